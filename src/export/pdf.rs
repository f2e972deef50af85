use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ApiError;
use crate::models::{clients, contracts, vehicles};

/// Render the one-page A4 contract sheet handed to the client at pickup.
pub fn contract_sheet(
    contract: &contracts::Model,
    client: &clients::Model,
    vehicle: &vehicles::Model,
) -> Result<Vec<u8>, ApiError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Contract {}", contract.id),
        Mm(210.0),
        Mm(297.0),
        "contract",
    );

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;

    let layer = doc.get_page(page).get_layer(layer);

    layer.use_text(
        format!("Rental contract #{}", contract.id),
        16.0,
        Mm(20.0),
        Mm(272.0),
        &bold,
    );

    let lines = [
        format!("Client: {}", client.full_name()),
        format!("Vehicle: {}", vehicle.label()),
        format!("Created: {}", contract.created_at.format("%d/%m/%Y %H:%M")),
        format!("Start date: {}", contract.start_date),
        format!("End date: {}", contract.end_date),
        format!("Duration: {} day(s)", contract.duration_days),
        format!("Total amount: {}", contract.total_amount),
        format!("Status: {:?}", contract.status),
        format!("Payment method: {:?}", contract.payment_method),
    ];

    let mut y = 257.0;
    for line in lines {
        layer.use_text(line, 12.0, Mm(20.0), Mm(y), &regular);
        y -= 8.0;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn pdf_error(e: printpdf::Error) -> ApiError {
    ApiError::Internal(format!("PDF generation failed: {e}"))
}
