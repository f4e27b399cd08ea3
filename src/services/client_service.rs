// src/services/client_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, db::ClientRepository, models::client::Client};

#[derive(Debug, Clone)]
pub struct ClientDraft {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub cnpj: Option<String>,
}

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &SqlitePool) -> Result<Vec<Client>, AppError> {
        self.repo.get_all(pool).await
    }

    pub async fn get(&self, pool: &SqlitePool, id: &str) -> Result<Client, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::ClientNotFound)
    }

    /// Cadastra um cliente. Um nome já existente (ignorando caixa) não gera
    /// duplicata: o registro existente é atualizado e a coleção mantém o
    /// mesmo tamanho.
    pub async fn create(&self, pool: &SqlitePool, draft: ClientDraft) -> Result<Client, AppError> {
        if let Some(existing) = self.repo.find_by_name(pool, &draft.name).await? {
            tracing::warn!(
                "⚠️ Cliente '{}' já cadastrado ({}); atualizando o registro existente",
                draft.name,
                existing.id
            );
            let client = Client {
                id: existing.id,
                name: draft.name,
                address: draft.address,
                contact: draft.contact,
                cnpj: draft.cnpj,
            };
            return self.repo.update(pool, &client).await;
        }

        let client = Client {
            id: format!("client-{}", Uuid::new_v4()),
            name: draft.name,
            address: draft.address,
            contact: draft.contact,
            cnpj: draft.cnpj,
        };
        self.repo.insert(pool, &client).await
    }

    /// Edição por id; se o novo nome colidir com outro cadastro, a edição é
    /// redirecionada para ele (mesma regra de deduplicação do cadastro).
    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: &str,
        draft: ClientDraft,
    ) -> Result<Client, AppError> {
        let target = match self.repo.find_by_id(pool, id).await? {
            Some(client) => client,
            None => {
                let by_name = self.repo.find_by_name(pool, &draft.name).await?;
                by_name.ok_or(AppError::ClientNotFound)?
            }
        };

        let client = Client {
            id: target.id,
            name: draft.name,
            address: draft.address,
            contact: draft.contact,
            cnpj: draft.cnpj,
        };
        self.repo.update(pool, &client).await
    }

    pub async fn delete(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        self.repo.delete(pool, id).await
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::test_pool;

    fn draft(name: &str) -> ClientDraft {
        ClientDraft {
            name: name.to_string(),
            address: "Rua Nova, 10".to_string(),
            contact: "Fulano (11) 90000-0000".to_string(),
            cnpj: None,
        }
    }

    #[tokio::test]
    async fn nome_repetido_atualiza_em_vez_de_duplicar() {
        let pool = test_pool().await;
        let svc = ClientService::new(ClientRepository::new());

        let before = svc.list(&pool).await.unwrap().len();

        // "COND. ED. TELLES" já existe no seed (client-1); caixa diferente
        // não engana a deduplicação.
        let saved = svc.create(&pool, draft("cond. ed. telles")).await.unwrap();
        assert_eq!(saved.id, "client-1");
        assert_eq!(saved.address, "Rua Nova, 10");
        assert_eq!(svc.list(&pool).await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn cadastro_novo_recebe_id_proprio() {
        let pool = test_pool().await;
        let svc = ClientService::new(ClientRepository::new());

        let before = svc.list(&pool).await.unwrap().len();
        let saved = svc.create(&pool, draft("Residencial das Flores")).await.unwrap();

        assert!(saved.id.starts_with("client-"));
        assert_eq!(svc.list(&pool).await.unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn editar_inexistente_sem_homonimo_falha() {
        let pool = test_pool().await;
        let svc = ClientService::new(ClientRepository::new());

        let err = svc
            .update(&pool, "client-999", draft("Ninguém Conhece"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ClientNotFound));
    }
}
