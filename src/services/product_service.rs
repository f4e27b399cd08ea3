// src/services/product_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::product::{ImportSummary, Product},
};

/// Descrição aplicada a linhas importadas sem descrição própria.
const IMPORTED_DESCRIPTION: &str = "Importado via Excel";

#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub cost_price: Option<f64>,
}

// =============================================================================
//  LEITURA DA PLANILHA (pura)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRow {
    pub name: String,
    pub unit_price: f64,
    pub cost_price: Option<f64>,
    pub description: Option<String>,
}

/// Cabeçalhos são comparados sem caixa e sem acentos ("Preço" == "preco").
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Valores monetários aceitam vírgula ou ponto como separador decimal.
fn parse_decimal(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace("R$", "").trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Lê a planilha CSV e separa linhas válidas de inválidas (sem nome ou sem
/// preço interpretável). Retorna as linhas aproveitáveis e quantas foram
/// ignoradas.
pub fn parse_spreadsheet(data: &[u8]) -> Result<(Vec<SpreadsheetRow>, usize), AppError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader.headers()?.clone();
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    let find = |names: &[&str]| -> Option<usize> {
        normalized.iter().position(|h| names.contains(&h.as_str()))
    };

    let name_idx = find(&["nome"]);
    let price_idx = find(&["preco", "valor de venda"]);
    let cost_idx = find(&["custo", "valor de compra"]);
    let description_idx = find(&["descricao"]);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;

        let name = name_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .unwrap_or("");
        let unit_price = price_idx
            .and_then(|i| record.get(i))
            .and_then(parse_decimal);

        let (name, unit_price) = match (name.is_empty(), unit_price) {
            (false, Some(price)) => (name.to_string(), price),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let cost_price = cost_idx.and_then(|i| record.get(i)).and_then(parse_decimal);
        let description = description_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        rows.push(SpreadsheetRow { name, unit_price, cost_price, description });
    }

    Ok((rows, skipped))
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &SqlitePool) -> Result<Vec<Product>, AppError> {
        self.repo.get_all(pool).await
    }

    pub async fn get(&self, pool: &SqlitePool, id: &str) -> Result<Product, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::ProductNotFound)
    }

    pub async fn create(&self, pool: &SqlitePool, draft: ProductDraft) -> Result<Product, AppError> {
        let product = Product {
            id: format!("prod-{}", Uuid::new_v4()),
            name: draft.name,
            description: draft.description,
            unit_price: draft.unit_price,
            cost_price: draft.cost_price,
        };
        self.repo.insert(pool, &product).await
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, AppError> {
        let product = Product {
            id: id.to_string(),
            name: draft.name,
            description: draft.description,
            unit_price: draft.unit_price,
            cost_price: draft.cost_price,
        };
        self.repo.update(pool, &product).await
    }

    pub async fn delete(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        self.repo.delete(pool, id).await
    }

    /// Importa uma planilha de produtos: linhas que batem com um produto já
    /// cadastrado (nome, ignorando caixa) atualizam preço, custo e descrição;
    /// as demais entram como produtos novos. Linhas inválidas são apenas
    /// contadas.
    pub async fn import_spreadsheet(
        &self,
        pool: &SqlitePool,
        data: &[u8],
    ) -> Result<ImportSummary, AppError> {
        let (rows, skipped) = parse_spreadsheet(data)?;

        let mut tx = pool.begin().await?;
        let mut imported = 0usize;

        for row in rows {
            let description = row
                .description
                .unwrap_or_else(|| IMPORTED_DESCRIPTION.to_string());

            match self.repo.find_by_name(&mut *tx, &row.name).await? {
                Some(existing) => {
                    let product = Product {
                        id: existing.id,
                        name: existing.name,
                        description,
                        unit_price: row.unit_price,
                        // Sem custo na planilha, o custo atual é mantido.
                        cost_price: row.cost_price.or(existing.cost_price),
                    };
                    self.repo.update(&mut *tx, &product).await?;
                }
                None => {
                    let product = Product {
                        id: format!("prod-import-{}", Uuid::new_v4()),
                        name: row.name,
                        description,
                        unit_price: row.unit_price,
                        cost_price: row.cost_price,
                    };
                    self.repo.insert(&mut *tx, &product).await?;
                }
            }

            imported += 1;
        }

        tx.commit().await?;

        tracing::info!("📦 Importação concluída: {} produto(s), {} linha(s) ignorada(s)", imported, skipped);
        Ok(ImportSummary { imported, skipped })
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cabecalhos_aceitam_acentos_e_caixa() {
        assert_eq!(normalize_header("Preço"), "preco");
        assert_eq!(normalize_header(" NOME "), "nome");
        assert_eq!(normalize_header("Descrição"), "descricao");
        assert_eq!(normalize_header("Valor de Venda"), "valor de venda");
    }

    #[test]
    fn decimais_aceitam_virgula_e_ponto() {
        assert_eq!(parse_decimal("149,90"), Some(149.90));
        assert_eq!(parse_decimal("149.90"), Some(149.90));
        assert_eq!(parse_decimal(" R$ 35,50 "), Some(35.50));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn planilha_com_cabecalhos_variantes_e_lida() {
        let csv = "Nome,Preço,Custo,Descrição\n\
                   Câmera Bullet,450,300,Câmera externa\n\
                   Sensor,\"180,50\",,\n";

        let (rows, skipped) = parse_spreadsheet(csv.as_bytes()).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Câmera Bullet");
        assert_eq!(rows[0].unit_price, 450.0);
        assert_eq!(rows[0].cost_price, Some(300.0));
        assert_eq!(rows[0].description.as_deref(), Some("Câmera externa"));

        assert_eq!(rows[1].unit_price, 180.50);
        assert_eq!(rows[1].cost_price, None);
        assert_eq!(rows[1].description, None);
    }

    #[test]
    fn cabecalhos_alternativos_de_preco_e_custo() {
        let csv = "nome,Valor de Venda,Valor de Compra\nDVR 8 canais,\"635,00\",\"405,99\"\n";

        let (rows, _) = parse_spreadsheet(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit_price, 635.0);
        assert_eq!(rows[0].cost_price, Some(405.99));
    }

    #[test]
    fn linhas_invalidas_sao_contadas_e_puladas() {
        let csv = "Nome,Preco\n\
                   Produto Bom,100\n\
                   ,200\n\
                   Sem Preco,abc\n\
                   Outro Bom,\"99,99\"\n";

        let (rows, skipped) = parse_spreadsheet(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn planilha_sem_coluna_de_preco_ignora_tudo() {
        let csv = "Nome,Qualquer\nProduto,100\n";

        let (rows, skipped) = parse_spreadsheet(csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
        assert_eq!(skipped, 1);
    }

    // =========================================================================
    //  TESTES COM BANCO
    // =========================================================================

    use crate::common::test_support::test_pool;
    use crate::db::ProductRepository;

    #[tokio::test]
    async fn importacao_atualiza_existentes_e_cria_novos() {
        let pool = test_pool().await;
        let svc = ProductService::new(ProductRepository::new());

        let before = svc.list(&pool).await.unwrap().len();

        // "Câmera IP Dome Full HD" já existe no seed (prod-2, custo 300);
        // a linha sem custo mantém o custo atual. O lower() do SQLite só
        // dobra ASCII, então o "â" precisa vir minúsculo.
        let csv = "Nome,Preço\n\
                   câmera IP DOME FULL HD,499\n\
                   Fonte Chaveada 12V,\"89,90\"\n\
                   ,123\n";

        let summary = svc.import_spreadsheet(&pool, csv.as_bytes()).await.unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);

        let products = svc.list(&pool).await.unwrap();
        assert_eq!(products.len(), before + 1);

        let updated = svc.get(&pool, "prod-2").await.unwrap();
        assert_eq!(updated.name, "Câmera IP Dome Full HD");
        assert_eq!(updated.unit_price, 499.0);
        assert_eq!(updated.cost_price, Some(300.0));

        let new = products
            .iter()
            .find(|p| p.name == "Fonte Chaveada 12V")
            .unwrap();
        assert!(new.id.starts_with("prod-import-"));
        assert_eq!(new.description, IMPORTED_DESCRIPTION);
        assert_eq!(new.unit_price, 89.90);
    }
}
