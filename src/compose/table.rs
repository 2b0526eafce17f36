//! Financial services table: fixed four-column schema, one bordered row per
//! service line, then the summary block. Every row asks the cursor for a
//! full row of space first, so rows never straddle a page boundary.

use crate::font::{FontContext, FontId};
use crate::layout::{Cursor, DrawOp, MM};
use crate::model::ServiceLine;
use crate::money;
use crate::text::TextFlow;

/// Column widths in millimeters: description / value / discount / total.
const COLUMN_WIDTHS_MM: [f64; 4] = [80.0, 30.0, 30.0, 30.0];
const ROW_HEIGHT: f64 = 8.0 * MM;
const CELL_PAD: f64 = 2.0 * MM;
/// Text baseline offset inside a row.
const CELL_BASELINE: f64 = 6.0 * MM;

/// Render the services section: centered title, bordered header row, one row
/// per line in insertion order, then subtotal / discounts / net total.
pub(crate) fn render(fonts: &FontContext, cursor: &mut Cursor, services: &[ServiceLine]) {
    let geom = cursor.geometry();
    let margin = geom.margin;

    cursor.ensure_space(60.0 * MM);

    let title = "SERVIÇOS CONTRATADOS";
    let title_x = (geom.width - fonts.measure_str(title, FontId::HelveticaBold, 14.0)) / 2.0;
    cursor.push(DrawOp::Text {
        x: title_x,
        y: cursor.y(),
        text: title.to_string(),
        font: FontId::HelveticaBold,
        size: 14.0,
    });
    cursor.advance(15.0 * MM);

    let widths: Vec<f64> = COLUMN_WIDTHS_MM.iter().map(|w| w * MM).collect();
    let mut positions = Vec::with_capacity(widths.len());
    let mut x = margin;
    for w in &widths {
        positions.push(x);
        x += w;
    }
    let total_width: f64 = widths.iter().sum();

    // Header row: one outer border, bold column captions.
    cursor.ensure_space(ROW_HEIGHT);
    cursor.push(DrawOp::Rect {
        x: margin,
        y: cursor.y(),
        width: total_width,
        height: ROW_HEIGHT,
    });
    let captions = ["DESCRIÇÃO DO SERVIÇO", "VALOR", "DESCONTO", "TOTAL"];
    for (caption, &x) in captions.iter().zip(&positions) {
        cursor.push(DrawOp::Text {
            x: x + CELL_PAD,
            y: cursor.y() + CELL_BASELINE,
            text: caption.to_string(),
            font: FontId::HelveticaBold,
            size: 10.0,
        });
    }
    cursor.advance(ROW_HEIGHT);

    let flow = TextFlow::new(fonts);
    for service in services {
        cursor.ensure_space(ROW_HEIGHT);

        for (&x, &w) in positions.iter().zip(&widths) {
            cursor.push(DrawOp::Rect {
                x,
                y: cursor.y(),
                width: w,
                height: ROW_HEIGHT,
            });
        }

        // Single-line cell: keep the first wrapped line, drop the overflow.
        let description = flow
            .wrap(
                &service.description,
                widths[0] - 2.0 * CELL_PAD,
                FontId::Helvetica,
                10.0,
            )
            .into_iter()
            .next()
            .unwrap_or_default();

        let cells = [
            description,
            money::format_amount(service.value),
            money::format_amount(service.discount),
            money::format_amount(money::line_total(service)),
        ];
        for (text, &x) in cells.into_iter().zip(&positions) {
            cursor.push(DrawOp::Text {
                x: x + CELL_PAD,
                y: cursor.y() + CELL_BASELINE,
                text,
                font: FontId::Helvetica,
                size: 10.0,
            });
        }
        cursor.advance(ROW_HEIGHT);
    }

    summary(cursor, services);
}

/// The three summary lines. Totals come from the aggregator, the same
/// functions any caller uses, so printed and computed values cannot drift.
fn summary(cursor: &mut Cursor, services: &[ServiceLine]) {
    let margin = cursor.geometry().margin;

    cursor.advance(5.0 * MM);

    cursor.ensure_space(ROW_HEIGHT);
    cursor.push(DrawOp::Text {
        x: margin,
        y: cursor.y(),
        text: format!("Subtotal: R$ {}", money::format_amount(money::subtotal(services))),
        font: FontId::HelveticaBold,
        size: 10.0,
    });
    cursor.advance(ROW_HEIGHT);

    let discounts = money::discount_total(services);
    if discounts > 0.0 {
        cursor.ensure_space(ROW_HEIGHT);
        cursor.push(DrawOp::Text {
            x: margin,
            y: cursor.y(),
            text: format!("Total de Descontos: R$ {}", money::format_amount(discounts)),
            font: FontId::HelveticaBold,
            size: 10.0,
        });
        cursor.advance(ROW_HEIGHT);
    }

    cursor.ensure_space(ROW_HEIGHT);
    cursor.push(DrawOp::Text {
        x: margin,
        y: cursor.y(),
        text: format!("VALOR TOTAL: R$ {}", money::format_amount(money::net_total(services))),
        font: FontId::HelveticaBold,
        size: 12.0,
    });
    cursor.advance(15.0 * MM);
}
