// src/services/quote_service.rs

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, QuoteRepository, SettingsRepository},
    models::quote::{
        BoardColumn, InstallationProgress, Quote, QuoteBoard, QuoteItem, QuoteStatus, QuoteTotals,
    },
};

/// Pontos creditados quando uma instalação é concluída pela primeira vez.
pub const POINTS_PER_COMPLETION: i64 = 25;

// =============================================================================
//  ENTRADAS DO SERVIÇO
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuoteItemDraft {
    pub product_id: Option<String>,
    pub product_name: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub client_id: String,
    pub date: String,
    pub items: Vec<QuoteItemDraft>,
    pub discount: Option<f64>,
    pub payment_terms: String,
    pub installments: Option<i64>,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    pub salesperson: Option<String>,
    pub validity_days: Option<i64>,
    pub installation_address: Option<String>,
    pub installation_date: Option<String>,
    pub installation_cost: Option<f64>,
    pub installation_progress: Option<InstallationProgress>,
    pub installation_materials: Option<String>,
    pub installation_notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InstallationUpdate {
    pub progress: InstallationProgress,
    pub address: Option<String>,
    pub date: Option<String>,
    pub cost: Option<f64>,
    pub materials: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
//  REGRAS PURAS (totais, versionamento, quadro)
// =============================================================================

/// Totais derivados dos itens. `totalAmount` acompanha o subtotal; o desconto
/// registrado é informativo e não entra no cálculo.
pub fn calculate_totals(items: &[QuoteItem], installments: Option<i64>) -> QuoteTotals {
    let sub_total: f64 = items.iter().map(|item| item.total_price).sum();
    let total_amount = sub_total;
    let installment_amount = match installments {
        Some(n) if n > 0 => total_amount / n as f64,
        _ => 0.0,
    };

    QuoteTotals { sub_total, total_amount, installment_amount }
}

/// Materializa os itens do rascunho: quantidades e preços negativos viram zero
/// e o total do item é sempre recalculado.
pub fn build_items(drafts: &[QuoteItemDraft]) -> Vec<QuoteItem> {
    drafts
        .iter()
        .map(|draft| {
            let quantity = draft.quantity.max(0.0);
            let unit_price = draft.unit_price.max(0.0);
            QuoteItem {
                id: format!("item-{}", Uuid::new_v4()),
                product_id: draft.product_id.clone(),
                product_name: draft.product_name.clone(),
                description: draft.description.clone(),
                quantity,
                unit_price,
                total_price: quantity * unit_price,
            }
        })
        .collect()
}

/// Raiz da cadeia de revisões: tudo antes do primeiro sufixo `-v`.
pub fn base_id(id: &str) -> &str {
    id.splitn(2, "-v").next().unwrap_or(id)
}

/// Código de uma nova revisão: `{raiz}-v{versão}`.
pub fn version_id(source: &Quote, new_version: i64) -> String {
    let base_source = source.original_quote_id.as_deref().unwrap_or(&source.id);
    format!("{}-v{}", base_id(base_source), new_version)
}

fn fresh_quote_id() -> String {
    format!("ORC-{}", Utc::now().timestamp_millis())
}

/// Sair do status Aprovado com a instalação concluída rebaixa o andamento
/// para Agendada (a conclusão pressupõe aprovação vigente).
pub fn normalize_progress(
    status: QuoteStatus,
    progress: Option<InstallationProgress>,
) -> Option<InstallationProgress> {
    if status != QuoteStatus::Approved && progress == Some(InstallationProgress::Completed) {
        Some(InstallationProgress::Scheduled)
    } else {
        progress
    }
}

/// Coluna do quadro em que o orçamento aparece; Rejeitados e Cancelados ficam
/// de fora.
pub fn column_for(quote: &Quote) -> Option<BoardColumn> {
    match quote.status {
        QuoteStatus::Draft => Some(BoardColumn::Draft),
        QuoteStatus::Pending => Some(BoardColumn::Pending),
        QuoteStatus::Approved => {
            if quote.installation_progress == Some(InstallationProgress::Completed) {
                Some(BoardColumn::Completed)
            } else {
                Some(BoardColumn::Approved)
            }
        }
        QuoteStatus::Rejected | QuoteStatus::Canceled => None,
    }
}

/// Regras de arrastar-e-soltar do quadro.
pub fn apply_column(
    column: BoardColumn,
    progress: Option<InstallationProgress>,
) -> (QuoteStatus, Option<InstallationProgress>) {
    match column {
        BoardColumn::Draft => (QuoteStatus::Draft, normalize_progress(QuoteStatus::Draft, progress)),
        BoardColumn::Pending => {
            (QuoteStatus::Pending, normalize_progress(QuoteStatus::Pending, progress))
        }
        BoardColumn::Approved => (QuoteStatus::Approved, progress),
        BoardColumn::Completed => (QuoteStatus::Approved, Some(InstallationProgress::Completed)),
    }
}

pub fn group_board(quotes: Vec<Quote>) -> QuoteBoard {
    let mut board = QuoteBoard {
        draft: Vec::new(),
        pending: Vec::new(),
        approved: Vec::new(),
        completed: Vec::new(),
    };

    for quote in quotes {
        match column_for(&quote) {
            Some(BoardColumn::Draft) => board.draft.push(quote),
            Some(BoardColumn::Pending) => board.pending.push(quote),
            Some(BoardColumn::Approved) => board.approved.push(quote),
            Some(BoardColumn::Completed) => board.completed.push(quote),
            None => {}
        }
    }

    board
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
    client_repo: ClientRepository,
    settings_repo: SettingsRepository,
}

impl QuoteService {
    pub fn new(
        repo: QuoteRepository,
        client_repo: ClientRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self { repo, client_repo, settings_repo }
    }

    pub async fn list(&self, pool: &SqlitePool) -> Result<Vec<Quote>, AppError> {
        self.repo.get_all(pool).await
    }

    pub async fn get(&self, pool: &SqlitePool, id: &str) -> Result<Quote, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::QuoteNotFound)
    }

    pub async fn board(&self, pool: &SqlitePool) -> Result<QuoteBoard, AppError> {
        let quotes = self.repo.get_all(pool).await?;
        Ok(group_board(quotes))
    }

    /// Cria um orçamento novo (versão 1, sem cadeia de revisões).
    pub async fn create(&self, pool: &SqlitePool, draft: QuoteDraft) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let quote = self
            .assemble(&mut tx, fresh_quote_id(), None, 1, draft)
            .await?;
        let saved = self.repo.insert(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, None, &saved).await?;

        tx.commit().await?;
        tracing::info!("📝 Orçamento {} criado para {}", saved.id, saved.client_name);
        Ok(saved)
    }

    /// Edição in-place: mantém código, versão e cadeia.
    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: &str,
        draft: QuoteDraft,
    ) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let quote = self
            .assemble(
                &mut tx,
                existing.id.clone(),
                existing.original_quote_id.clone(),
                existing.version,
                draft,
            )
            .await?;
        let saved = self.repo.update(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, Some(&existing), &saved).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Grava como nova versão: o orçamento de origem fica intacto e a revisão
    /// entra como registro irmão (`{raiz}-v{N}`).
    pub async fn create_version(
        &self,
        pool: &SqlitePool,
        source_id: &str,
        draft: QuoteDraft,
    ) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let source = self
            .repo
            .find_by_id(&mut *tx, source_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let new_version = source.version + 1;
        let new_id = version_id(&source, new_version);
        let original = source
            .original_quote_id
            .clone()
            .unwrap_or_else(|| base_id(&source.id).to_string());

        let quote = self
            .assemble(&mut tx, new_id, Some(original), new_version, draft)
            .await?;
        let saved = self.repo.insert(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, None, &saved).await?;

        tx.commit().await?;
        tracing::info!("🔁 Revisão {} criada a partir de {}", saved.id, source_id);
        Ok(saved)
    }

    pub async fn delete(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        self.repo.delete(pool, id).await
    }

    /// Troca manual de status (qualquer status alcança qualquer outro).
    pub async fn set_status(
        &self,
        pool: &SqlitePool,
        id: &str,
        status: QuoteStatus,
    ) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let mut quote = existing.clone();
        quote.status = status;
        quote.installation_progress = normalize_progress(status, quote.installation_progress);

        let saved = self.repo.update(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, Some(&existing), &saved).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Atualiza a ordem de serviço (andamento e dados da instalação).
    pub async fn set_installation(
        &self,
        pool: &SqlitePool,
        id: &str,
        update: InstallationUpdate,
    ) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let mut quote = existing.clone();
        quote.installation_progress = normalize_progress(quote.status, Some(update.progress));
        if update.address.is_some() {
            quote.installation_address = update.address;
        }
        if update.date.is_some() {
            quote.installation_date = update.date;
        }
        if update.cost.is_some() {
            quote.installation_cost = update.cost;
        }
        if update.materials.is_some() {
            quote.installation_materials = update.materials;
        }
        if update.notes.is_some() {
            quote.installation_notes = update.notes;
        }

        let saved = self.repo.update(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, Some(&existing), &saved).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Movimento no quadro kanban.
    pub async fn move_to_column(
        &self,
        pool: &SqlitePool,
        id: &str,
        column: BoardColumn,
    ) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let (status, progress) = apply_column(column, existing.installation_progress);
        let mut quote = existing.clone();
        quote.status = status;
        quote.installation_progress = progress;

        let saved = self.repo.update(&mut *tx, &quote).await?;
        self.award_if_completed(&mut tx, Some(&existing), &saved).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Monta o registro completo a partir do rascunho: snapshot do cliente,
    /// itens normalizados, totais recalculados e padrões das preferências.
    async fn assemble(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: String,
        original_quote_id: Option<String>,
        version: i64,
        draft: QuoteDraft,
    ) -> Result<Quote, AppError> {
        let client = self
            .client_repo
            .find_by_id(&mut **tx, &draft.client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let settings = self.settings_repo.get_settings(&mut **tx).await?;

        let items = build_items(&draft.items);
        let totals = calculate_totals(&items, draft.installments);
        let installment_amount =
            draft.installments.map(|_| totals.installment_amount);

        let status = draft.status;
        let installation_progress = normalize_progress(status, draft.installation_progress);

        Ok(Quote {
            id,
            original_quote_id,
            version,
            client_id: client.id.clone(),
            client_name: client.name.clone(),
            client_details: Some(Json(client)),
            date: draft.date,
            items: Json(items),
            sub_total: totals.sub_total,
            discount: draft.discount,
            total_amount: totals.total_amount,
            payment_terms: draft.payment_terms,
            installments: draft.installments,
            installment_amount,
            status,
            notes: draft.notes,
            salesperson: draft
                .salesperson
                .or(Some(settings.default_salesperson)),
            validity_days: draft.validity_days.or(Some(settings.default_validity_days)),
            installation_address: draft.installation_address,
            installation_date: draft.installation_date,
            installation_cost: draft.installation_cost,
            installation_progress,
            installation_materials: draft.installation_materials,
            installation_notes: draft.installation_notes,
        })
    }

    /// Credita os pontos de conclusão exatamente uma vez por transição:
    /// compara o andamento gravado antes da persistência com o novo.
    async fn award_if_completed(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        previous: Option<&Quote>,
        saved: &Quote,
    ) -> Result<(), AppError> {
        let was_completed = previous
            .map(|q| q.installation_progress == Some(InstallationProgress::Completed))
            .unwrap_or(false);
        let is_completed = saved.installation_progress == Some(InstallationProgress::Completed);

        if !was_completed && is_completed {
            let points = self
                .settings_repo
                .add_points(&mut **tx, POINTS_PER_COMPLETION)
                .await?;
            tracing::info!(
                "🏆 Instalação do orçamento {} concluída: +{} pontos (total: {})",
                saved.id,
                POINTS_PER_COMPLETION,
                points.points
            );
        }

        Ok(())
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, unit_price: f64) -> QuoteItem {
        QuoteItem {
            id: "item-1".to_string(),
            product_id: None,
            product_name: "Câmera".to_string(),
            description: String::new(),
            quantity,
            unit_price,
            total_price: quantity * unit_price,
        }
    }

    fn quote_with(status: QuoteStatus, progress: Option<InstallationProgress>) -> Quote {
        Quote {
            id: "ORC-1".to_string(),
            original_quote_id: None,
            version: 1,
            client_id: "client-1".to_string(),
            client_name: "Cliente".to_string(),
            client_details: None,
            date: "2024-06-10".to_string(),
            items: Json(vec![]),
            sub_total: 0.0,
            discount: None,
            total_amount: 0.0,
            payment_terms: String::new(),
            installments: None,
            installment_amount: None,
            status,
            notes: None,
            salesperson: None,
            validity_days: None,
            installation_address: None,
            installation_date: None,
            installation_cost: None,
            installation_progress: progress,
            installation_materials: None,
            installation_notes: None,
        }
    }

    #[test]
    fn totals_somam_itens_e_dividem_parcelas() {
        let items = vec![item(2.0, 100.0), item(3.0, 50.0)];
        let totals = calculate_totals(&items, Some(3));

        assert!((totals.sub_total - 350.0).abs() < 1e-9);
        assert!((totals.total_amount - 350.0).abs() < 1e-9);
        assert!((totals.installment_amount - 350.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn totals_sem_parcelas_zera_valor_da_parcela() {
        let items = vec![item(1.0, 99.9)];
        assert_eq!(calculate_totals(&items, None).installment_amount, 0.0);
        assert_eq!(calculate_totals(&items, Some(0)).installment_amount, 0.0);
    }

    #[test]
    fn totals_de_lista_vazia_sao_zero() {
        let totals = calculate_totals(&[], Some(5));
        assert_eq!(totals.sub_total, 0.0);
        assert_eq!(totals.total_amount, 0.0);
        assert_eq!(totals.installment_amount, 0.0);
    }

    #[test]
    fn build_items_normaliza_negativos_e_recalcula_total() {
        let drafts = vec![
            QuoteItemDraft {
                product_id: None,
                product_name: "Sensor".to_string(),
                description: "Sensor de presença dual tech.".to_string(),
                quantity: -2.0,
                unit_price: 100.0,
            },
            QuoteItemDraft {
                product_id: Some("prod-1".to_string()),
                product_name: "Câmera".to_string(),
                description: String::new(),
                quantity: 3.0,
                unit_price: -10.0,
            },
        ];

        let items = build_items(&drafts);
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(items[0].total_price, 0.0);
        assert_eq!(items[0].description, "Sensor de presença dual tech.");
        assert_eq!(items[1].unit_price, 0.0);
        assert_eq!(items[1].total_price, 0.0);
    }

    #[test]
    fn base_id_remove_sufixo_de_versao() {
        assert_eq!(base_id("ORC-1718000000000"), "ORC-1718000000000");
        assert_eq!(base_id("ORC-1718000000000-v2"), "ORC-1718000000000");
        assert_eq!(base_id("ORC-1718000000000-v12"), "ORC-1718000000000");
    }

    #[test]
    fn version_id_usa_raiz_da_cadeia() {
        // Revisão a partir da primeira versão
        let first = quote_with(QuoteStatus::Draft, None);
        assert_eq!(version_id(&first, 2), "ORC-1-v2");

        // Revisão a partir de outra revisão preserva a raiz original
        let mut second = quote_with(QuoteStatus::Draft, None);
        second.id = "ORC-1-v2".to_string();
        second.original_quote_id = Some("ORC-1".to_string());
        second.version = 2;
        assert_eq!(version_id(&second, 3), "ORC-1-v3");
    }

    #[test]
    fn sair_de_aprovado_concluido_volta_para_agendada() {
        let progress = normalize_progress(
            QuoteStatus::Pending,
            Some(InstallationProgress::Completed),
        );
        assert_eq!(progress, Some(InstallationProgress::Scheduled));

        // Aprovado concluído permanece concluído
        let kept = normalize_progress(
            QuoteStatus::Approved,
            Some(InstallationProgress::Completed),
        );
        assert_eq!(kept, Some(InstallationProgress::Completed));

        // Andamentos não concluídos não são tocados
        let untouched = normalize_progress(
            QuoteStatus::Draft,
            Some(InstallationProgress::InProgress),
        );
        assert_eq!(untouched, Some(InstallationProgress::InProgress));
    }

    #[test]
    fn coluna_derivada_do_status_e_andamento() {
        assert_eq!(
            column_for(&quote_with(QuoteStatus::Draft, None)),
            Some(BoardColumn::Draft)
        );
        assert_eq!(
            column_for(&quote_with(QuoteStatus::Pending, None)),
            Some(BoardColumn::Pending)
        );
        assert_eq!(
            column_for(&quote_with(QuoteStatus::Approved, Some(InstallationProgress::Scheduled))),
            Some(BoardColumn::Approved)
        );
        assert_eq!(
            column_for(&quote_with(QuoteStatus::Approved, Some(InstallationProgress::Completed))),
            Some(BoardColumn::Completed)
        );
        assert_eq!(column_for(&quote_with(QuoteStatus::Rejected, None)), None);
        assert_eq!(column_for(&quote_with(QuoteStatus::Canceled, None)), None);
    }

    #[test]
    fn soltar_na_coluna_concluida_aprova_e_conclui() {
        let (status, progress) =
            apply_column(BoardColumn::Completed, Some(InstallationProgress::Scheduled));
        assert_eq!(status, QuoteStatus::Approved);
        assert_eq!(progress, Some(InstallationProgress::Completed));
    }

    #[test]
    fn soltar_em_coluna_anterior_reseta_conclusao() {
        let (status, progress) =
            apply_column(BoardColumn::Pending, Some(InstallationProgress::Completed));
        assert_eq!(status, QuoteStatus::Pending);
        assert_eq!(progress, Some(InstallationProgress::Scheduled));

        // Coluna Aprovado mantém o andamento como está
        let (status, progress) =
            apply_column(BoardColumn::Approved, Some(InstallationProgress::InProgress));
        assert_eq!(status, QuoteStatus::Approved);
        assert_eq!(progress, Some(InstallationProgress::InProgress));
    }

    #[test]
    fn quadro_agrupa_sem_persistir_rejeitados() {
        let quotes = vec![
            quote_with(QuoteStatus::Draft, None),
            quote_with(QuoteStatus::Pending, None),
            quote_with(QuoteStatus::Approved, Some(InstallationProgress::InProgress)),
            quote_with(QuoteStatus::Approved, Some(InstallationProgress::Completed)),
            quote_with(QuoteStatus::Rejected, None),
        ];

        let board = group_board(quotes);
        assert_eq!(board.draft.len(), 1);
        assert_eq!(board.pending.len(), 1);
        assert_eq!(board.approved.len(), 1);
        assert_eq!(board.completed.len(), 1);
    }

    // =========================================================================
    //  TESTES COM BANCO (migrações + seeds em memória)
    // =========================================================================

    use crate::common::test_support::test_pool;

    fn service() -> QuoteService {
        QuoteService::new(
            QuoteRepository::new(),
            ClientRepository::new(),
            SettingsRepository::new(),
        )
    }

    fn draft(status: QuoteStatus, progress: Option<InstallationProgress>) -> QuoteDraft {
        QuoteDraft {
            client_id: "client-1".to_string(),
            date: "2024-06-10".to_string(),
            items: vec![QuoteItemDraft {
                product_id: Some("prod-2".to_string()),
                product_name: "Câmera IP Dome Full HD".to_string(),
                description: "Câmera de segurança IP, resolução Full HD.".to_string(),
                quantity: 2.0,
                unit_price: 450.0,
            }],
            discount: None,
            payment_terms: "3X sem juros".to_string(),
            installments: Some(3),
            status,
            notes: None,
            salesperson: None,
            validity_days: None,
            installation_address: None,
            installation_date: None,
            installation_cost: None,
            installation_progress: progress,
            installation_materials: None,
            installation_notes: None,
        }
    }

    #[tokio::test]
    async fn criar_orcamento_preenche_snapshot_e_padroes() {
        let pool = test_pool().await;
        let svc = service();

        let quote = svc.create(&pool, draft(QuoteStatus::Draft, None)).await.unwrap();

        assert!(quote.id.starts_with("ORC-"));
        assert_eq!(quote.version, 1);
        assert_eq!(quote.client_name, "COND. ED. TELLES");
        assert!(quote.client_details.is_some());
        // Padrões vindos das preferências seedadas
        assert_eq!(quote.salesperson.as_deref(), Some("Jorcimar"));
        assert_eq!(quote.validity_days, Some(15));
        assert!((quote.sub_total - 900.0).abs() < 1e-9);
        assert_eq!(quote.installment_amount, Some(300.0));
        // A descrição digitada no item acompanha o registro gravado
        assert_eq!(
            quote.items[0].description,
            "Câmera de segurança IP, resolução Full HD."
        );
    }

    #[tokio::test]
    async fn materiais_da_instalacao_sao_gravados_e_atualizados() {
        let pool = test_pool().await;
        let svc = service();

        let mut with_materials = draft(QuoteStatus::Approved, Some(InstallationProgress::Scheduled));
        with_materials.installation_materials = Some("20m de cabo UTP, 2 conectores".to_string());

        let quote = svc.create(&pool, with_materials).await.unwrap();
        assert_eq!(
            quote.installation_materials.as_deref(),
            Some("20m de cabo UTP, 2 conectores")
        );

        // A ordem de serviço pode trocar a lista de materiais...
        let update = InstallationUpdate {
            progress: InstallationProgress::InProgress,
            address: None,
            date: None,
            cost: None,
            materials: Some("20m de cabo UTP, 2 conectores, 1 rack".to_string()),
            notes: None,
        };
        let saved = svc.set_installation(&pool, &quote.id, update).await.unwrap();
        assert_eq!(
            saved.installation_materials.as_deref(),
            Some("20m de cabo UTP, 2 conectores, 1 rack")
        );

        // ...e campos omitidos mantêm o valor gravado
        let partial = InstallationUpdate {
            progress: InstallationProgress::InProgress,
            address: None,
            date: None,
            cost: None,
            materials: None,
            notes: Some("Aguardando liberação do condomínio".to_string()),
        };
        let kept = svc.set_installation(&pool, &quote.id, partial).await.unwrap();
        assert_eq!(
            kept.installation_materials.as_deref(),
            Some("20m de cabo UTP, 2 conectores, 1 rack")
        );
    }

    #[tokio::test]
    async fn revisao_preserva_a_origem_e_entra_como_irma() {
        let pool = test_pool().await;
        let svc = service();

        let original = svc.create(&pool, draft(QuoteStatus::Pending, None)).await.unwrap();
        let revision = svc
            .create_version(&pool, &original.id, draft(QuoteStatus::Pending, None))
            .await
            .unwrap();

        assert_eq!(revision.id, format!("{}-v2", original.id));
        assert_eq!(revision.version, 2);
        assert_eq!(revision.original_quote_id.as_deref(), Some(original.id.as_str()));

        // A origem continua intacta e os dois registros convivem na listagem
        let kept = svc.get(&pool, &original.id).await.unwrap();
        assert_eq!(kept.version, 1);
        assert_eq!(svc.list(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn pontos_creditados_uma_so_vez_por_conclusao() {
        let pool = test_pool().await;
        let svc = service();
        let settings_repo = SettingsRepository::new();

        let quote = svc
            .create(
                &pool,
                draft(QuoteStatus::Approved, Some(InstallationProgress::Scheduled)),
            )
            .await
            .unwrap();
        assert_eq!(settings_repo.get_points(&pool).await.unwrap().points, 0);

        let update = InstallationUpdate {
            progress: InstallationProgress::Completed,
            address: None,
            date: None,
            cost: None,
            materials: None,
            notes: None,
        };
        svc.set_installation(&pool, &quote.id, update.clone()).await.unwrap();
        assert_eq!(settings_repo.get_points(&pool).await.unwrap().points, 25);

        // Regravar já concluído não credita de novo
        svc.set_installation(&pool, &quote.id, update).await.unwrap();
        assert_eq!(settings_repo.get_points(&pool).await.unwrap().points, 25);

        // Voltar no quadro rebaixa o andamento; concluir de novo é nova transição
        let moved = svc
            .move_to_column(&pool, &quote.id, BoardColumn::Pending)
            .await
            .unwrap();
        assert_eq!(moved.installation_progress, Some(InstallationProgress::Scheduled));

        svc.move_to_column(&pool, &quote.id, BoardColumn::Completed).await.unwrap();
        assert_eq!(settings_repo.get_points(&pool).await.unwrap().points, 50);
    }

    #[tokio::test]
    async fn rascunho_com_cliente_inexistente_falha() {
        let pool = test_pool().await;
        let svc = service();

        let mut bad = draft(QuoteStatus::Draft, None);
        bad.client_id = "client-999".to_string();

        let err = svc.create(&pool, bad).await.unwrap_err();
        assert!(matches!(err, AppError::ClientNotFound));
    }
}
