//! Medicines service.

use async_trait::async_trait;
use mims::{
    medicines::{Medicine, MedicineInput},
    products::ProductId,
};
use mockall::automock;
use reqwest::Method;
use serde::Serialize;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const MEDICINES_PATH: &str = "/inventario/medicamentos-crud/";

fn medicine_path(id: &ProductId) -> String {
    format!("{MEDICINES_PATH}{id}/")
}

#[derive(Debug, Serialize)]
struct ActiveUpdate {
    estado: bool,
}

#[derive(Debug, Clone)]
pub struct HttpMedicinesService {
    client: ApiClient,
}

impl HttpMedicinesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MedicinesService for HttpMedicinesService {
    async fn list_medicines(&self, session: &SessionContext) -> Result<Vec<Medicine>, ApiError> {
        let medicines: Paginated<Medicine> = self.client.get(session, MEDICINES_PATH, &[]).await?;

        Ok(medicines.into_items())
    }

    async fn get_medicine(
        &self,
        session: &SessionContext,
        id: &ProductId,
    ) -> Result<Medicine, ApiError> {
        self.client.get(session, &medicine_path(id), &[]).await
    }

    async fn create_medicine(
        &self,
        session: &SessionContext,
        medicine: &MedicineInput,
    ) -> Result<Medicine, ApiError> {
        self.client
            .send(Method::POST, session, MEDICINES_PATH, medicine)
            .await
    }

    async fn update_medicine(
        &self,
        session: &SessionContext,
        id: &ProductId,
        medicine: &MedicineInput,
    ) -> Result<Medicine, ApiError> {
        self.client
            .send(Method::PUT, session, &medicine_path(id), medicine)
            .await
    }

    async fn delete_medicine(&self, session: &SessionContext, id: &ProductId) -> Result<(), ApiError> {
        self.client.delete(session, &medicine_path(id)).await
    }

    async fn set_active(
        &self,
        session: &SessionContext,
        id: &ProductId,
        active: bool,
    ) -> Result<Medicine, ApiError> {
        self.client
            .send(
                Method::PATCH,
                session,
                &medicine_path(id),
                &ActiveUpdate { estado: active },
            )
            .await
    }
}

#[automock]
#[async_trait]
pub trait MedicinesService: Send + Sync {
    async fn list_medicines(&self, session: &SessionContext) -> Result<Vec<Medicine>, ApiError>;

    async fn get_medicine(
        &self,
        session: &SessionContext,
        id: &ProductId,
    ) -> Result<Medicine, ApiError>;

    async fn create_medicine(
        &self,
        session: &SessionContext,
        medicine: &MedicineInput,
    ) -> Result<Medicine, ApiError>;

    async fn update_medicine(
        &self,
        session: &SessionContext,
        id: &ProductId,
        medicine: &MedicineInput,
    ) -> Result<Medicine, ApiError>;

    async fn delete_medicine(&self, session: &SessionContext, id: &ProductId) -> Result<(), ApiError>;

    /// Toggle whether the medicine is offered in the storefront.
    async fn set_active(
        &self,
        session: &SessionContext,
        id: &ProductId,
        active: bool,
    ) -> Result<Medicine, ApiError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn item_paths_end_with_a_slash() {
        assert_eq!(
            medicine_path(&ProductId::from(7_u64)),
            "/inventario/medicamentos-crud/7/"
        );
    }

    #[test]
    fn toggle_body_only_carries_the_state() -> TestResult {
        assert_eq!(
            serde_json::to_value(ActiveUpdate { estado: false })?,
            serde_json::json!({"estado": false})
        );

        Ok(())
    }
}
