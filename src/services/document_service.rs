// src/services/document_service.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use genpdf::{elements, style, Element};
use image::GenericImageView;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::{QuoteRepository, SettingsRepository},
    models::{quote::Quote, settings::CompanyInfo},
    services::pagination::slice_heights,
};

// Página A4 e margem usadas em todos os documentos (mm).
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const PAGE_MARGIN_MM: f64 = 10.0;
const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum DocumentKind {
    Quote,
    ServiceOrder,
}

/// Código do orçamento reduzido a `[A-Za-z0-9_]` para uso em nome de arquivo.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn document_filename(kind: DocumentKind, quote_id: &str) -> String {
    match kind {
        DocumentKind::Quote => format!("orcamento-{}.pdf", sanitize_id(quote_id)),
        DocumentKind::ServiceOrder => format!("OS-{}.pdf", sanitize_id(quote_id)),
    }
}

/// Decodifica um data URL de PNG/JPEG (`data:image/png;base64,...`) ou um
/// payload base64 puro.
pub fn decode_image_data(data: &str) -> Result<image::DynamicImage, AppError> {
    let payload = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    };

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| AppError::InvalidImage(format!("base64 inválido: {}", e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| AppError::InvalidImage(format!("não foi possível ler a imagem: {}", e)))
}

#[derive(Clone)]
pub struct DocumentService {
    repo: QuoteRepository,
    settings_repo: SettingsRepository,
    // Exportações em andamento, uma por documento (reentrância é recusada).
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl DocumentService {
    pub fn new(repo: QuoteRepository, settings_repo: SettingsRepository) -> Self {
        Self {
            repo,
            settings_repo,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    // =========================================================================
    //  EXPORTAÇÃO DA PRÉ-VISUALIZAÇÃO (imagem -> PDF paginado)
    // =========================================================================

    /// Converte a captura da pré-visualização em um PDF A4, fatiando a imagem
    /// em quantas páginas forem necessárias. Retorna o nome do arquivo e os
    /// bytes do documento.
    pub async fn render_snapshot(
        &self,
        pool: &SqlitePool,
        kind: DocumentKind,
        quote_id: &str,
        image_data: &str,
    ) -> Result<(String, Vec<u8>), AppError> {
        let quote = self
            .repo
            .find_by_id(pool, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let filename = document_filename(kind, &quote.id);

        {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !in_flight.insert(filename.clone()) {
                return Err(AppError::ExportInProgress(filename));
            }
        }

        let result = self.render_snapshot_inner(kind, &quote, image_data);

        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&filename);

        result.map(|bytes| (filename, bytes))
    }

    fn render_snapshot_inner(
        &self,
        kind: DocumentKind,
        quote: &Quote,
        image_data: &str,
    ) -> Result<Vec<u8>, AppError> {
        let mut source = decode_image_data(image_data)?;
        let (width, height) = source.dimensions();

        let printable_width = PAGE_WIDTH_MM - 2.0 * PAGE_MARGIN_MM;
        let printable_height = PAGE_HEIGHT_MM - 2.0 * PAGE_MARGIN_MM;
        let slices = slice_heights(width, height, printable_width, printable_height)?;

        // A imagem preenche a largura útil da página nesta densidade.
        let dpi = width as f64 / (printable_width / MM_PER_INCH);

        let mut doc = self.new_document(match kind {
            DocumentKind::Quote => format!("Orçamento {}", quote.id),
            DocumentKind::ServiceOrder => format!("Ordem de Serviço {}", quote.id),
        })?;

        for (index, slice) in slices.iter().enumerate() {
            if index > 0 {
                doc.push(elements::PageBreak::new());
            }

            let chunk = source.crop(0, slice.y, width, slice.height);
            let pdf_image = elements::Image::from_dynamic_image(chunk)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_alignment(genpdf::Alignment::Center)
                .with_dpi(dpi);
            doc.push(pdf_image);
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        tracing::info!(
            "🖨️ Documento {} renderizado ({} página(s))",
            document_filename(kind, &quote.id),
            slices.len()
        );
        Ok(buffer)
    }

    // =========================================================================
    //  DOCUMENTOS NATIVOS (layout montado no servidor)
    // =========================================================================

    pub async fn generate_quote_pdf(
        &self,
        pool: &SqlitePool,
        quote_id: &str,
    ) -> Result<(String, Vec<u8>), AppError> {
        let quote = self
            .repo
            .find_by_id(pool, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;
        let company = self.settings_repo.get_company_info(pool).await?;

        let mut doc = self.new_document(format!("Orçamento {}", quote.id))?;
        self.push_header(&mut doc, &company);

        doc.push(
            elements::Paragraph::new(format!("ORÇAMENTO {}", quote.id))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Data: {}   Status: {}",
            quote.date,
            quote.status.label()
        )));
        if let Some(days) = quote.validity_days {
            doc.push(elements::Paragraph::new(format!("Validade: {} dias", days)));
        }
        if let Some(salesperson) = quote.salesperson.as_deref() {
            doc.push(elements::Paragraph::new(format!("Vendedor: {}", salesperson)));
        }

        doc.push(elements::Break::new(1));
        self.push_client_block(&mut doc, &quote);
        doc.push(elements::Break::new(1));
        self.push_items_table(&mut doc, &quote)?;
        doc.push(elements::Break::new(1));
        self.push_totals(&mut doc, &quote);

        if !quote.payment_terms.is_empty() {
            doc.push(elements::Break::new(1));
            doc.push(
                elements::Paragraph::new("Condições de Pagamento")
                    .styled(style::Style::new().bold()),
            );
            doc.push(elements::Paragraph::new(quote.payment_terms.clone()));
        }

        if let Some(notes) = quote.notes.as_deref() {
            doc.push(elements::Break::new(1));
            doc.push(elements::Paragraph::new("Observações").styled(style::Style::new().bold()));
            doc.push(elements::Paragraph::new(notes));
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok((document_filename(DocumentKind::Quote, &quote.id), buffer))
    }

    pub async fn generate_service_order_pdf(
        &self,
        pool: &SqlitePool,
        quote_id: &str,
    ) -> Result<(String, Vec<u8>), AppError> {
        let quote = self
            .repo
            .find_by_id(pool, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;
        let company = self.settings_repo.get_company_info(pool).await?;

        let mut doc = self.new_document(format!("Ordem de Serviço {}", quote.id))?;
        self.push_header(&mut doc, &company);

        doc.push(
            elements::Paragraph::new(format!("ORDEM DE SERVIÇO {}", quote.id))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Orçamento de referência: {}", quote.date)));

        doc.push(elements::Break::new(1));
        self.push_client_block(&mut doc, &quote);

        // --- DADOS DA INSTALAÇÃO ---
        doc.push(elements::Break::new(1));
        doc.push(
            elements::Paragraph::new("Dados da Instalação").styled(style::Style::new().bold()),
        );

        // Sem endereço próprio, a instalação acontece no endereço do cliente.
        let address = quote
            .installation_address
            .clone()
            .or_else(|| {
                quote
                    .client_details
                    .as_ref()
                    .map(|details| details.address.clone())
            })
            .unwrap_or_else(|| "A definir".to_string());
        doc.push(elements::Paragraph::new(format!("Endereço: {}", address)));

        if let Some(date) = quote.installation_date.as_deref() {
            doc.push(elements::Paragraph::new(format!("Data prevista: {}", date)));
        }
        if let Some(progress) = quote.installation_progress {
            doc.push(elements::Paragraph::new(format!("Andamento: {}", progress.label())));
        }
        if let Some(materials) = quote.installation_materials.as_deref() {
            doc.push(elements::Paragraph::new(format!("Materiais: {}", materials)));
        }
        if let Some(notes) = quote.installation_notes.as_deref() {
            doc.push(elements::Paragraph::new(format!("Notas: {}", notes)));
        }

        doc.push(elements::Break::new(1));
        self.push_items_table(&mut doc, &quote)?;

        // --- ASSINATURAS ---
        doc.push(elements::Break::new(3));
        doc.push(elements::Paragraph::new(
            "______________________________          ______________________________",
        ));
        doc.push(elements::Paragraph::new(
            "        Técnico Responsável                          Cliente",
        ));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok((document_filename(DocumentKind::ServiceOrder, &quote.id), buffer))
    }

    // =========================================================================
    //  BLOCOS COMPARTILHADOS
    // =========================================================================

    fn new_document(&self, title: String) -> Result<genpdf::Document, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("pasta ./fonts sem a família Roboto".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        Ok(doc)
    }

    fn push_header(&self, doc: &mut genpdf::Document, company: &CompanyInfo) {
        doc.push(
            elements::Paragraph::new(company.name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(company.address.clone())
                .styled(style::Style::new().with_font_size(10)),
        );

        let mut contact_line = format!("{} | {}", company.phone, company.email);
        if let Some(website) = company.website.as_deref() {
            contact_line.push_str(&format!(" | {}", website));
        }
        doc.push(
            elements::Paragraph::new(contact_line).styled(style::Style::new().with_font_size(10)),
        );

        if let Some(cnpj) = company.cnpj.as_deref() {
            doc.push(
                elements::Paragraph::new(format!("CNPJ: {}", cnpj))
                    .styled(style::Style::new().with_font_size(10)),
            );
        }

        doc.push(elements::Break::new(1.5));
    }

    fn push_client_block(&self, doc: &mut genpdf::Document, quote: &Quote) {
        doc.push(elements::Paragraph::new("Cliente").styled(style::Style::new().bold()));
        doc.push(elements::Paragraph::new(quote.client_name.clone()));

        if let Some(details) = quote.client_details.as_ref() {
            doc.push(elements::Paragraph::new(details.address.clone()));
            doc.push(elements::Paragraph::new(details.contact.clone()));
            if let Some(cnpj) = details.cnpj.as_deref() {
                doc.push(elements::Paragraph::new(format!("CNPJ: {}", cnpj)));
            }
        }
    }

    fn push_items_table(
        &self,
        doc: &mut genpdf::Document,
        quote: &Quote,
    ) -> Result<(), AppError> {
        // Pesos das colunas: Produto (4), Qtd (1), Unitário (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Produto").styled(style_bold))
            .element(elements::Paragraph::new("Qtd").styled(style_bold))
            .element(elements::Paragraph::new("Unitário").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        for item in quote.items.iter() {
            // Nome do produto com a descrição logo abaixo, em corpo menor.
            let mut product_cell = elements::LinearLayout::vertical();
            product_cell.push(elements::Paragraph::new(item.product_name.clone()));
            if !item.description.is_empty() {
                product_cell.push(
                    elements::Paragraph::new(item.description.clone())
                        .styled(style::Style::new().with_font_size(8)),
                );
            }

            table
                .row()
                .element(product_cell)
                .element(elements::Paragraph::new(format!("{:.2}", item.quantity)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", item.unit_price)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", item.total_price)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        doc.push(table);
        Ok(())
    }

    fn push_totals(&self, doc: &mut genpdf::Document, quote: &Quote) {
        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL: R$ {:.2}", quote.total_amount));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        if let (Some(installments), Some(amount)) = (quote.installments, quote.installment_amount) {
            if installments > 0 {
                let mut installment_paragraph = elements::Paragraph::new(format!(
                    "{}x de R$ {:.2}",
                    installments, amount
                ));
                installment_paragraph.set_alignment(genpdf::Alignment::Right);
                doc.push(installment_paragraph.styled(style::Style::new().with_font_size(10)));
            }
        }
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_de_arquivo_troca_nao_alfanumericos_por_underscore() {
        assert_eq!(sanitize_id("ORC-1718000000000-v2"), "ORC_1718000000000_v2");
        assert_eq!(sanitize_id("abc 123/é"), "abc_123__");
    }

    #[test]
    fn nomes_de_documentos_seguem_o_prefixo_do_tipo() {
        assert_eq!(
            document_filename(DocumentKind::Quote, "ORC-1-v2"),
            "orcamento-ORC_1_v2.pdf"
        );
        assert_eq!(
            document_filename(DocumentKind::ServiceOrder, "ORC-1"),
            "OS-ORC_1.pdf"
        );
    }

    #[test]
    fn data_url_invalido_e_recusado() {
        assert!(matches!(
            decode_image_data("data:image/png;base64,@@@@"),
            Err(AppError::InvalidImage(_))
        ));
        assert!(matches!(
            decode_image_data("nem é base64 válido!"),
            Err(AppError::InvalidImage(_))
        ));
    }

    #[test]
    fn decodifica_png_minimo() {
        // PNG 1x1 transparente
        let png_base64 = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
        let data_url = format!("data:image/png;base64,{}", png_base64);

        let img = decode_image_data(&data_url).unwrap();
        assert_eq!(img.dimensions(), (1, 1));
    }
}
