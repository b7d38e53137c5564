//! Invoice submission
//!
//! Saves an employee's invoice draft, creating a new invoice or updating the one being edited.
//! The draft is cleared only once the backend has accepted it.

use jiff::civil::Date;
use mims::invoices::{Invoice, InvoiceDraft, InvoiceDraftError};
use thiserror::Error;
use tracing::{info, warn};

use crate::{client::ApiError, domain::invoices::InvoicesService, session::SessionContext};

#[derive(Debug, Error)]
pub enum InvoiceSubmitError {
    #[error(transparent)]
    Draft(#[from] InvoiceDraftError),

    #[error("invoice submission failed")]
    Api(#[from] ApiError),
}

/// Save `draft`, then start a fresh draft issued on `today` for the same client.
///
/// # Errors
///
/// Returns an error, leaving the draft untouched, when the draft has no client or no lines, or the
/// backend rejects the invoice. An invalid draft is never sent.
pub async fn submit_invoice(
    draft: &mut InvoiceDraft<'_>,
    session: &SessionContext,
    invoices: &dyn InvoicesService,
    today: Date,
) -> Result<Invoice, InvoiceSubmitError> {
    let payload = draft.to_payload()?;

    let result = if let Some(id) = draft.invoice_id() {
        invoices.update_invoice(session, id, &payload).await
    } else {
        invoices.create_invoice(session, &payload).await
    };

    match result {
        Ok(saved) => {
            info!(
                invoice = saved.id,
                updated = draft.invoice_id().is_some(),
                lines = payload.lines.len(),
                total = %payload.total,
                "invoice saved"
            );

            draft.clear(today);

            Ok(saved)
        }
        Err(error) => {
            warn!(%error, invoice = ?draft.invoice_id(), "invoice submission failed");

            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use mims::{products::CatalogSnapshot, users::UserId};
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::COP};
    use testresult::TestResult;

    use super::*;
    use crate::{domain::invoices::MockInvoicesService, session::ApiToken};

    fn employee() -> SessionContext {
        SessionContext::with_token(ApiToken::new("tok"))
    }

    fn saved(id: u64) -> Result<Invoice, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "cliente": 5,
            "fecha_emision": "2025-06-02",
            "total": "3000.00"
        }))
    }

    fn filled_draft() -> Result<InvoiceDraft<'static>, mims::cart::CartError> {
        let mut draft = InvoiceDraft::new(COP, date(2025, 6, 2));

        draft.client = Some(UserId(5));
        draft.add_item(
            &CatalogSnapshot::new(12_u64, "Ibuprofeno", Money::from_minor(150_000, COP)),
            2,
        )?;

        Ok(draft)
    }

    #[tokio::test]
    async fn saved_invoice_clears_the_draft() -> TestResult {
        let created = saved(31)?;
        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_create_invoice()
            .withf(|_, invoice| {
                invoice.client == UserId(5)
                    && invoice.total == Decimal::new(300_000, 2)
                    && invoice.lines.len() == 1
            })
            .times(1)
            .return_once(move |_, _| Ok(created));
        invoices.expect_update_invoice().never();

        let mut draft = filled_draft()?;
        let invoice = submit_invoice(&mut draft, &employee(), &invoices, date(2025, 6, 3)).await?;

        assert_eq!(invoice.id, 31);
        assert!(draft.items().is_empty());
        assert_eq!(draft.client, Some(UserId(5)));
        assert_eq!(draft.issued_on, date(2025, 6, 3));

        Ok(())
    }

    #[tokio::test]
    async fn edited_invoice_is_updated_in_place() -> TestResult {
        let existing = saved(9)?;
        let updated = saved(9)?;
        let mut invoices = MockInvoicesService::new();

        invoices.expect_create_invoice().never();
        invoices
            .expect_update_invoice()
            .withf(|_, id, invoice| *id == 9 && invoice.lines.len() == 1)
            .times(1)
            .return_once(move |_, _, _| Ok(updated));

        let mut draft = InvoiceDraft::from_invoice(&existing, COP)?;
        draft.add_item(
            &CatalogSnapshot::new(12_u64, "Ibuprofeno", Money::from_minor(150_000, COP)),
            2,
        )?;

        submit_invoice(&mut draft, &employee(), &invoices, date(2025, 6, 3)).await?;

        assert_eq!(draft.invoice_id(), None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices.expect_create_invoice().times(1).returning(|_, _| {
            Err(ApiError::Status {
                status: 400,
                body: "cliente inválido".to_string(),
            })
        });

        let mut draft = filled_draft()?;
        let before = draft.clone();

        let result = submit_invoice(&mut draft, &employee(), &invoices, date(2025, 6, 3)).await;

        assert!(matches!(
            result,
            Err(InvoiceSubmitError::Api(ApiError::Status { status: 400, .. }))
        ));
        assert_eq!(draft, before);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_draft_is_never_sent() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices.expect_create_invoice().never();
        invoices.expect_update_invoice().never();

        let mut draft = filled_draft()?;
        draft.client = None;
        let before = draft.clone();

        let result = submit_invoice(&mut draft, &employee(), &invoices, date(2025, 6, 3)).await;

        assert!(matches!(
            result,
            Err(InvoiceSubmitError::Draft(InvoiceDraftError::MissingClient))
        ));
        assert_eq!(draft, before);

        Ok(())
    }
}
