pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::catalog::handlers as hotel_handlers;
use crate::chat::handlers as chat_handlers;
use crate::importer::handlers as import_handlers;
use crate::state::AppState;
use crate::{news, slides};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Hotel catalog
        .route(
            "/api/v1/hotels",
            get(hotel_handlers::handle_list_hotels).post(hotel_handlers::handle_upsert_hotel),
        )
        .route(
            "/api/v1/hotels/import",
            post(import_handlers::handle_import_file),
        )
        .route(
            "/api/v1/hotels/import/sheet",
            post(import_handlers::handle_import_sheet),
        )
        .route(
            "/api/v1/hotels/import/template",
            get(import_handlers::handle_template_download),
        )
        .route(
            "/api/v1/hotels/:id",
            get(hotel_handlers::handle_get_hotel).delete(hotel_handlers::handle_delete_hotel),
        )
        // News bulletins
        .route(
            "/api/v1/news",
            get(news::handle_list_news).post(news::handle_upsert_news),
        )
        .route("/api/v1/news/:id", axum::routing::delete(news::handle_delete_news))
        // Homepage slides
        .route(
            "/api/v1/slides",
            get(slides::handle_list_slides).post(slides::handle_upsert_slide),
        )
        .route(
            "/api/v1/slides/:id",
            axum::routing::delete(slides::handle_delete_slide),
        )
        // Assistant
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        // Auth & user management
        .route("/api/v1/auth/signup", post(auth_handlers::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth_handlers::handle_sign_in))
        .route("/api/v1/auth/signout", post(auth_handlers::handle_sign_out))
        .route("/api/v1/auth/me", get(auth_handlers::handle_me))
        .route("/api/v1/users", get(auth_handlers::handle_list_users))
        .route(
            "/api/v1/users/:id/active",
            patch(auth_handlers::handle_set_active),
        )
        .with_state(state)
}
