//! Contact messages and reviews.

use async_trait::async_trait;
use mims::messages::{ContactMessage, NewContactMessage, NewReview, Review};
use mockall::automock;
use reqwest::Method;
use serde::Serialize;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const MESSAGES_PATH: &str = "/mensajes/mensajes/";
const REVIEWS_PATH: &str = "/mensajes/resenas/";

#[derive(Debug, Serialize)]
struct ReadUpdate {
    leido: bool,
}

#[derive(Debug, Clone)]
pub struct HttpMessagesService {
    client: ApiClient,
}

impl HttpMessagesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagesService for HttpMessagesService {
    async fn list_messages(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<ContactMessage>, ApiError> {
        let messages: Paginated<ContactMessage> =
            self.client.get(session, MESSAGES_PATH, &[]).await?;

        Ok(messages.into_items())
    }

    async fn send_message(
        &self,
        session: &SessionContext,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ApiError> {
        self.client
            .send(Method::POST, session, MESSAGES_PATH, message)
            .await
    }

    async fn mark_read(
        &self,
        session: &SessionContext,
        id: u64,
    ) -> Result<ContactMessage, ApiError> {
        self.client
            .send(
                Method::PATCH,
                session,
                &format!("{MESSAGES_PATH}{id}/"),
                &ReadUpdate { leido: true },
            )
            .await
    }

    async fn list_reviews(&self, session: &SessionContext) -> Result<Vec<Review>, ApiError> {
        let reviews: Paginated<Review> = self.client.get(session, REVIEWS_PATH, &[]).await?;

        Ok(reviews.into_items())
    }

    async fn create_review(
        &self,
        session: &SessionContext,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        self.client
            .send(Method::POST, session, REVIEWS_PATH, review)
            .await
    }
}

#[automock]
#[async_trait]
pub trait MessagesService: Send + Sync {
    async fn list_messages(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<ContactMessage>, ApiError>;

    async fn send_message(
        &self,
        session: &SessionContext,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ApiError>;

    async fn mark_read(
        &self,
        session: &SessionContext,
        id: u64,
    ) -> Result<ContactMessage, ApiError>;

    async fn list_reviews(&self, session: &SessionContext) -> Result<Vec<Review>, ApiError>;

    async fn create_review(
        &self,
        session: &SessionContext,
        review: &NewReview,
    ) -> Result<Review, ApiError>;
}
