// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo: API v1, health e Swagger UI.
pub fn app_router(app_state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/", post(handlers::user::create_user).get(handlers::user::list_users))
        .route("/phone/{phone}", get(handlers::user::get_user_by_phone))
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        );

    let city_routes = Router::new()
        .route("/", post(handlers::city::create_city).get(handlers::city::list_cities))
        .route(
            "/{id}",
            get(handlers::city::get_city)
                .put(handlers::city::update_city)
                .delete(handlers::city::delete_city),
        );

    let restaurant_routes = Router::new()
        .route(
            "/",
            post(handlers::restaurant::create_restaurant)
                .get(handlers::restaurant::list_restaurants),
        )
        .route("/city/{city_id}", get(handlers::restaurant::list_restaurants_by_city))
        .route(
            "/{id}",
            get(handlers::restaurant::get_restaurant)
                .put(handlers::restaurant::update_restaurant)
                .delete(handlers::restaurant::delete_restaurant),
        );

    let section_routes = Router::new()
        .route("/", post(handlers::section::create_section))
        .route(
            "/restaurant/{restaurant_id}",
            get(handlers::section::list_sections_by_restaurant),
        )
        .route(
            "/{id}",
            get(handlers::section::get_section)
                .put(handlers::section::update_section)
                .delete(handlers::section::delete_section),
        );

    let table_routes = Router::new()
        .route("/", post(handlers::table::create_table))
        .route("/section/{section_id}", get(handlers::table::list_tables_by_section))
        .route("/qr/missing", get(handlers::table::list_missing_qr))
        .route("/qr/repair", post(handlers::table::repair_missing_qr))
        .route(
            "/{id}",
            get(handlers::table::get_table)
                .put(handlers::table::update_table)
                .delete(handlers::table::delete_table),
        )
        .route("/{id}/qr", post(handlers::table::generate_qr))
        .route("/{id}/qr.png", get(handlers::table::render_qr_png));

    let menu_type_routes = Router::new()
        .route(
            "/",
            post(handlers::menu_type::create_menu_type).get(handlers::menu_type::list_menu_types),
        )
        .route(
            "/{id}",
            get(handlers::menu_type::get_menu_type)
                .put(handlers::menu_type::update_menu_type)
                .delete(handlers::menu_type::delete_menu_type),
        );

    let menu_routes = Router::new()
        .route("/", post(handlers::menu::create_menu))
        .route("/restaurant/{restaurant_id}", get(handlers::menu::list_menus_by_restaurant))
        .route(
            "/{id}",
            get(handlers::menu::get_menu)
                .put(handlers::menu::update_menu)
                .delete(handlers::menu::delete_menu),
        );

    let event_routes = Router::new()
        .route("/", post(handlers::event::create_event).get(handlers::event::list_events))
        .route("/type/{event_type}", get(handlers::event::list_events_by_type))
        .route(
            "/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        );

    let booking_routes = Router::new()
        .route(
            "/",
            post(handlers::booking::book_table).delete(handlers::booking::cancel_booking),
        )
        .route("/availability", get(handlers::booking::check_availability))
        .route("/available", get(handlers::booking::list_available_tables))
        .route("/table/{table_id}", get(handlers::booking::list_table_bookings))
        .route("/event/{event_id}", get(handlers::booking::list_event_bookings));

    let api_v1 = Router::new()
        .nest("/users", user_routes)
        .nest("/cities", city_routes)
        .nest("/restaurants", restaurant_routes)
        .nest("/sections", section_routes)
        .nest("/tables", table_routes)
        .nest("/menu-types", menu_type_routes)
        .nest("/menus", menu_routes)
        .nest("/events", event_routes)
        .nest("/bookings", booking_routes);

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_v1)
        .with_state(app_state)
}
