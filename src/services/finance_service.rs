// src/services/finance_service.rs

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, QuoteRepository},
    models::{
        finance::{
            ClientRevenueEntry, InstallationProfitEntry, ManualTransaction, PeriodSummary,
            ProductRevenueEntry, TransactionKind,
        },
        quote::{Quote, QuoteStatus},
    },
};

/// Alíquota do imposto estimado sobre orçamentos aprovados.
pub const ESTIMATED_TAX_RATE: f64 = 0.20;

/// Datas são armazenadas como texto; valores malformados ficam fora de
/// qualquer agregação.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn in_month(value: &str, month: u32, year: i32) -> bool {
    parse_date(value)
        .map(|d| d.month() == month && d.year() == year)
        .unwrap_or(false)
}

fn in_range(value: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    let Some(date) = parse_date(value) else {
        return false;
    };
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

// =============================================================================
//  AGREGAÇÃO PURA
// =============================================================================

/// Fechamento de um mês:
/// - a receber: orçamentos Aprovados/Pendentes pela data de emissão + entradas;
/// - a pagar: custo de instalação de Aprovados pela data da instalação,
///   saídas manuais e imposto estimado (20% dos Aprovados do mês);
/// - saldo: a receber menos a pagar.
pub fn summarize_period(
    quotes: &[Quote],
    transactions: &[ManualTransaction],
    month: u32,
    year: i32,
) -> PeriodSummary {
    let quote_receivables: f64 = quotes
        .iter()
        .filter(|q| matches!(q.status, QuoteStatus::Approved | QuoteStatus::Pending))
        .filter(|q| in_month(&q.date, month, year))
        .map(|q| q.total_amount)
        .sum();

    let approved_in_month: f64 = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .filter(|q| in_month(&q.date, month, year))
        .map(|q| q.total_amount)
        .sum();

    let installation_payables: f64 = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .filter(|q| {
            q.installation_date
                .as_deref()
                .map(|d| in_month(d, month, year))
                .unwrap_or(false)
        })
        .filter_map(|q| q.installation_cost)
        .sum();

    let manual_income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .filter(|t| in_month(&t.date, month, year))
        .map(|t| t.amount)
        .sum();

    let manual_expenses: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .filter(|t| in_month(&t.date, month, year))
        .map(|t| t.amount)
        .sum();

    let estimated_tax = approved_in_month * ESTIMATED_TAX_RATE;
    let total_receivables = quote_receivables + manual_income;
    let total_payables = installation_payables + manual_expenses + estimated_tax;

    PeriodSummary {
        month,
        year,
        quote_receivables,
        manual_income,
        total_receivables,
        installation_payables,
        manual_expenses,
        estimated_tax,
        total_payables,
        net_balance: total_receivables - total_payables,
    }
}

/// Receita por cliente (orçamentos Aprovados, data de emissão no intervalo).
pub fn revenue_by_client(
    quotes: &[Quote],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<ClientRevenueEntry> {
    let mut by_client: HashMap<String, (usize, f64)> = HashMap::new();
    for quote in quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .filter(|q| in_range(&q.date, start, end))
    {
        let entry = by_client.entry(quote.client_name.clone()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += quote.total_amount;
    }

    let mut entries: Vec<ClientRevenueEntry> = by_client
        .into_iter()
        .map(|(client_name, (quote_count, total))| ClientRevenueEntry {
            client_name,
            quote_count,
            total,
        })
        .collect();
    entries.sort_by(|a, b| b.total.total_cmp(&a.total));
    entries
}

/// Receita por produto, somada sobre os itens dos Aprovados no intervalo.
pub fn revenue_by_product(
    quotes: &[Quote],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<ProductRevenueEntry> {
    let mut by_product: HashMap<String, (f64, f64)> = HashMap::new();
    for quote in quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .filter(|q| in_range(&q.date, start, end))
    {
        for item in quote.items.iter() {
            let entry = by_product.entry(item.product_name.clone()).or_insert((0.0, 0.0));
            entry.0 += item.quantity;
            entry.1 += item.total_price;
        }
    }

    let mut entries: Vec<ProductRevenueEntry> = by_product
        .into_iter()
        .map(|(product_name, (quantity, total))| ProductRevenueEntry {
            product_name,
            quantity,
            total,
        })
        .collect();
    entries.sort_by(|a, b| b.total.total_cmp(&a.total));
    entries
}

/// Lucratividade das instalações: total do orçamento menos custo de
/// instalação, para Aprovados com custo informado.
pub fn installation_profitability(
    quotes: &[Quote],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<InstallationProfitEntry> {
    let mut entries: Vec<InstallationProfitEntry> = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .filter(|q| in_range(&q.date, start, end))
        .map(|q| {
            let installation_cost = q.installation_cost.unwrap_or(0.0);
            InstallationProfitEntry {
                quote_id: q.id.clone(),
                client_name: q.client_name.clone(),
                total_amount: q.total_amount,
                installation_cost,
                profit: q.total_amount - installation_cost,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    entries
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    quote_repo: QuoteRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, quote_repo: QuoteRepository) -> Self {
        Self { repo, quote_repo }
    }

    pub async fn monthly_summary(
        &self,
        pool: &SqlitePool,
        month: u32,
        year: i32,
    ) -> Result<PeriodSummary, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriod(format!("mês {}", month)));
        }

        let quotes = self.quote_repo.get_all(pool).await?;
        let transactions = self.repo.get_all_transactions(pool).await?;

        Ok(summarize_period(&quotes, &transactions, month, year))
    }

    pub async fn list_transactions(
        &self,
        pool: &SqlitePool,
    ) -> Result<Vec<ManualTransaction>, AppError> {
        self.repo.get_all_transactions(pool).await
    }

    pub async fn create_transaction(
        &self,
        pool: &SqlitePool,
        kind: TransactionKind,
        description: String,
        amount: f64,
        date: String,
        category: Option<String>,
        notes: Option<String>,
    ) -> Result<ManualTransaction, AppError> {
        let transaction = ManualTransaction {
            id: format!("txn-{}", Uuid::new_v4()),
            kind,
            description,
            amount,
            date,
            category,
            notes,
        };
        self.repo.insert_transaction(pool, &transaction).await
    }

    pub async fn update_transaction(
        &self,
        pool: &SqlitePool,
        id: &str,
        kind: TransactionKind,
        description: String,
        amount: f64,
        date: String,
        category: Option<String>,
        notes: Option<String>,
    ) -> Result<ManualTransaction, AppError> {
        let transaction = ManualTransaction {
            id: id.to_string(),
            kind,
            description,
            amount,
            date,
            category,
            notes,
        };
        self.repo.update_transaction(pool, &transaction).await
    }

    pub async fn delete_transaction(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        self.repo.delete_transaction(pool, id).await
    }

    pub async fn client_revenue_report(
        &self,
        pool: &SqlitePool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ClientRevenueEntry>, AppError> {
        let quotes = self.quote_repo.get_all(pool).await?;
        Ok(revenue_by_client(&quotes, start, end))
    }

    pub async fn product_revenue_report(
        &self,
        pool: &SqlitePool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ProductRevenueEntry>, AppError> {
        let quotes = self.quote_repo.get_all(pool).await?;
        Ok(revenue_by_product(&quotes, start, end))
    }

    pub async fn profitability_report(
        &self,
        pool: &SqlitePool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<InstallationProfitEntry>, AppError> {
        let quotes = self.quote_repo.get_all(pool).await?;
        Ok(installation_profitability(&quotes, start, end))
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn quote(
        status: QuoteStatus,
        date: &str,
        total: f64,
        installation_date: Option<&str>,
        installation_cost: Option<f64>,
    ) -> Quote {
        Quote {
            id: format!("ORC-{}", date),
            original_quote_id: None,
            version: 1,
            client_id: "client-1".to_string(),
            client_name: "Cliente".to_string(),
            client_details: None,
            date: date.to_string(),
            items: Json(vec![]),
            sub_total: total,
            discount: None,
            total_amount: total,
            payment_terms: String::new(),
            installments: None,
            installment_amount: None,
            status,
            notes: None,
            salesperson: None,
            validity_days: None,
            installation_address: None,
            installation_date: installation_date.map(|d| d.to_string()),
            installation_cost,
            installation_progress: None,
            installation_materials: None,
            installation_notes: None,
        }
    }

    fn txn(kind: TransactionKind, amount: f64, date: &str) -> ManualTransaction {
        ManualTransaction {
            id: format!("txn-{}", date),
            kind,
            description: "Lançamento".to_string(),
            amount,
            date: date.to_string(),
            category: None,
            notes: None,
        }
    }

    #[test]
    fn fechamento_mensal_cruza_emissao_e_instalacao() {
        let quotes = vec![
            // Aprovado emitido em junho, instalação em julho
            quote(QuoteStatus::Approved, "2024-06-10", 1000.0, Some("2024-07-02"), Some(200.0)),
            // Pendente emitido em junho
            quote(QuoteStatus::Pending, "2024-06-15", 500.0, None, None),
            // Aprovado de maio não entra em junho
            quote(QuoteStatus::Approved, "2024-05-20", 900.0, Some("2024-06-05"), Some(150.0)),
            // Rascunho nunca entra
            quote(QuoteStatus::Draft, "2024-06-01", 9999.0, None, None),
        ];
        let transactions = vec![
            txn(TransactionKind::Income, 300.0, "2024-06-03"),
            txn(TransactionKind::Expense, 120.0, "2024-06-28"),
            txn(TransactionKind::Income, 50.0, "2024-07-01"),
        ];

        let summary = summarize_period(&quotes, &transactions, 6, 2024);

        // A receber: 1000 (aprovado) + 500 (pendente) + 300 (entrada manual)
        assert!((summary.quote_receivables - 1500.0).abs() < 1e-9);
        assert!((summary.total_receivables - 1800.0).abs() < 1e-9);

        // A pagar: instalação de maio que acontece em junho (150) + saída (120)
        // + imposto de 20% sobre os 1000 aprovados emitidos em junho (200)
        assert!((summary.installation_payables - 150.0).abs() < 1e-9);
        assert!((summary.estimated_tax - 200.0).abs() < 1e-9);
        assert!((summary.total_payables - 470.0).abs() < 1e-9);

        assert!((summary.net_balance - 1330.0).abs() < 1e-9);
    }

    #[test]
    fn datas_malformadas_ficam_fora_da_agregacao() {
        let quotes = vec![
            quote(QuoteStatus::Approved, "10/06/2024", 1000.0, None, None),
            quote(QuoteStatus::Approved, "", 800.0, None, None),
            quote(QuoteStatus::Approved, "2024-06-10", 700.0, Some("não é data"), Some(100.0)),
        ];

        let summary = summarize_period(&quotes, &[], 6, 2024);
        assert!((summary.quote_receivables - 700.0).abs() < 1e-9);
        assert_eq!(summary.installation_payables, 0.0);
    }

    #[test]
    fn mes_sem_movimento_fecha_zerado() {
        let summary = summarize_period(&[], &[], 2, 2024);
        assert_eq!(summary.total_receivables, 0.0);
        assert_eq!(summary.total_payables, 0.0);
        assert_eq!(summary.net_balance, 0.0);
    }

    #[test]
    fn receita_por_cliente_ordena_por_total() {
        let mut a = quote(QuoteStatus::Approved, "2024-06-10", 100.0, None, None);
        a.client_name = "Alfa".to_string();
        let mut b = quote(QuoteStatus::Approved, "2024-06-11", 900.0, None, None);
        b.client_name = "Beta".to_string();
        let mut c = quote(QuoteStatus::Pending, "2024-06-12", 9999.0, None, None);
        c.client_name = "Gama".to_string();

        let entries = revenue_by_client(&[a, b, c], None, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].client_name, "Beta");
        assert_eq!(entries[1].client_name, "Alfa");
    }

    #[test]
    fn lucratividade_desconta_custo_de_instalacao() {
        let quotes = vec![quote(
            QuoteStatus::Approved,
            "2024-06-10",
            1000.0,
            Some("2024-06-20"),
            Some(350.0),
        )];

        let entries = installation_profitability(&quotes, None, None);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].profit - 650.0).abs() < 1e-9);
    }

    #[test]
    fn intervalo_de_relatorio_filtra_por_emissao() {
        let quotes = vec![
            quote(QuoteStatus::Approved, "2024-06-10", 100.0, None, None),
            quote(QuoteStatus::Approved, "2024-08-10", 200.0, None, None),
        ];

        let start = NaiveDate::from_ymd_opt(2024, 6, 1);
        let end = NaiveDate::from_ymd_opt(2024, 6, 30);
        let entries = revenue_by_client(&quotes, start, end);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].total - 100.0).abs() < 1e-9);
    }

    // =========================================================================
    //  TESTES COM BANCO (migrações + seeds em memória)
    // =========================================================================

    use crate::common::test_support::test_pool;

    #[tokio::test]
    async fn lancamento_manual_grava_categoria_e_observacoes() {
        let pool = test_pool().await;
        let svc = FinanceService::new(FinanceRepository::new(), QuoteRepository::new());

        let created = svc
            .create_transaction(
                &pool,
                TransactionKind::Expense,
                "Compra de ferramentas".to_string(),
                350.0,
                "2024-06-05".to_string(),
                Some("Ferramentas".to_string()),
                Some("Furadeira e parafusadeira".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(created.category.as_deref(), Some("Ferramentas"));
        assert_eq!(created.notes.as_deref(), Some("Furadeira e parafusadeira"));

        // A edição pode limpar os campos opcionais
        let updated = svc
            .update_transaction(
                &pool,
                &created.id,
                TransactionKind::Expense,
                "Compra de ferramentas".to_string(),
                350.0,
                "2024-06-05".to_string(),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.category, None);
        assert_eq!(updated.notes, None);

        let listed = svc.list_transactions(&pool).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, None);
    }
}
