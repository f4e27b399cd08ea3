// src/services/pagination.rs
//
// Fatiamento de uma imagem alta (captura da pré-visualização) em páginas A4.
// A imagem é escalada para ocupar toda a largura útil da página; o excedente
// vertical vira páginas adicionais.

use crate::common::error::AppError;

/// Faixa horizontal da imagem de origem, em pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub y: u32,
    pub height: u32,
}

/// Calcula as faixas de origem para páginas de `page_width` x `page_height`
/// (mesma unidade entre si, normalmente mm).
///
/// A razão `page_width / image_width` define a escala; cada página comporta
/// `page_height / razão` pixels de origem. A última faixa é limitada ao que
/// resta da imagem e faixas sub-pixel são descartadas.
pub fn slice_heights(
    image_width: u32,
    image_height: u32,
    page_width: f64,
    page_height: f64,
) -> Result<Vec<PageSlice>, AppError> {
    if image_width == 0 || image_height == 0 {
        return Err(AppError::InvalidImage(
            "a imagem capturada tem dimensões nulas".to_string(),
        ));
    }

    let ratio = page_width / image_width as f64;
    let scaled_height = image_height as f64 * ratio;

    // Cabe inteira em uma página.
    if scaled_height <= page_height {
        return Ok(vec![PageSlice { y: 0, height: image_height }]);
    }

    // Altura de uma página, medida em pixels da imagem de origem.
    let step = page_height / ratio;

    let mut slices = Vec::new();
    let mut position = 0.0_f64;
    while position < image_height as f64 {
        let remaining = image_height as f64 - position;
        let height = remaining.min(step);
        let rounded = height.round() as u32;
        if rounded > 0 {
            slices.push(PageSlice { y: position.round() as u32, height: rounded });
        }
        position += step;
    }

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4_WIDTH: f64 = 210.0;
    const A4_HEIGHT: f64 = 297.0;

    #[test]
    fn imagem_curta_vira_uma_unica_pagina() {
        // 1000px de largura => 1 página comporta 297/ (210/1000) = 1414px
        let slices = slice_heights(1000, 1200, A4_WIDTH, A4_HEIGHT).unwrap();
        assert_eq!(slices, vec![PageSlice { y: 0, height: 1200 }]);
    }

    #[test]
    fn altura_exata_de_uma_pagina_nao_quebra() {
        let step = (A4_HEIGHT / (A4_WIDTH / 1000.0)).floor() as u32;
        let slices = slice_heights(1000, step, A4_WIDTH, A4_HEIGHT).unwrap();
        assert_eq!(slices.len(), 1);
    }

    #[test]
    fn duas_paginas_e_meia_geram_tres_fatias() {
        let step = A4_HEIGHT / (A4_WIDTH / 1000.0);
        let image_height = (step * 2.5).round() as u32;

        let slices = slice_heights(1000, image_height, A4_WIDTH, A4_HEIGHT).unwrap();
        assert_eq!(slices.len(), 3);

        // A última fatia é limitada ao que resta (~meia página)
        let last = slices.last().unwrap();
        let expected = (step * 0.5).round() as u32;
        assert!((last.height as i64 - expected as i64).abs() <= 1);
    }

    #[test]
    fn multiplo_exato_nao_gera_fatia_vazia() {
        let step = A4_HEIGHT / (A4_WIDTH / 1000.0);
        let image_height = (step * 2.0).round() as u32;

        let slices = slice_heights(1000, image_height, A4_WIDTH, A4_HEIGHT).unwrap();
        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(|s| s.height > 0));
    }

    #[test]
    fn fatias_cobrem_a_imagem_sem_sobreposicao() {
        let slices = slice_heights(800, 5000, A4_WIDTH, A4_HEIGHT).unwrap();

        let mut expected_y = 0i64;
        for slice in &slices {
            assert!((slice.y as i64 - expected_y).abs() <= 1);
            expected_y = slice.y as i64 + slice.height as i64;
        }
        assert!((expected_y - 5000).abs() <= 1);
    }

    #[test]
    fn dimensoes_nulas_sao_recusadas() {
        assert!(matches!(
            slice_heights(0, 100, A4_WIDTH, A4_HEIGHT),
            Err(AppError::InvalidImage(_))
        ));
        assert!(matches!(
            slice_heights(100, 0, A4_WIDTH, A4_HEIGHT),
            Err(AppError::InvalidImage(_))
        ));
    }
}
