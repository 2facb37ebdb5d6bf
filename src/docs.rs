// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Restaurant Backend", description = "Restaurantes, mesas, menus e reservas de eventos"),
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Users ---
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::get_user_by_phone,
        handlers::user::update_user,
        handlers::user::delete_user,

        // --- Cities ---
        handlers::city::create_city,
        handlers::city::list_cities,
        handlers::city::get_city,
        handlers::city::update_city,
        handlers::city::delete_city,

        // --- Restaurants ---
        handlers::restaurant::create_restaurant,
        handlers::restaurant::list_restaurants,
        handlers::restaurant::list_restaurants_by_city,
        handlers::restaurant::get_restaurant,
        handlers::restaurant::update_restaurant,
        handlers::restaurant::delete_restaurant,

        // --- Sections ---
        handlers::section::create_section,
        handlers::section::list_sections_by_restaurant,
        handlers::section::get_section,
        handlers::section::update_section,
        handlers::section::delete_section,

        // --- Tables ---
        handlers::table::create_table,
        handlers::table::list_tables_by_section,
        handlers::table::get_table,
        handlers::table::update_table,
        handlers::table::delete_table,
        handlers::table::generate_qr,
        handlers::table::render_qr_png,
        handlers::table::list_missing_qr,
        handlers::table::repair_missing_qr,

        // --- Menus ---
        handlers::menu_type::create_menu_type,
        handlers::menu_type::list_menu_types,
        handlers::menu_type::get_menu_type,
        handlers::menu_type::update_menu_type,
        handlers::menu_type::delete_menu_type,
        handlers::menu::create_menu,
        handlers::menu::list_menus_by_restaurant,
        handlers::menu::get_menu,
        handlers::menu::update_menu,
        handlers::menu::delete_menu,

        // --- Events ---
        handlers::event::create_event,
        handlers::event::list_events,
        handlers::event::list_events_by_type,
        handlers::event::get_event,
        handlers::event::update_event,
        handlers::event::delete_event,

        // --- Bookings ---
        handlers::booking::book_table,
        handlers::booking::cancel_booking,
        handlers::booking::check_availability,
        handlers::booking::list_available_tables,
        handlers::booking::list_table_bookings,
        handlers::booking::list_event_bookings,
    ),
    components(
        schemas(
            // --- Models ---
            models::user::User,
            models::city::City,
            models::restaurant::Restaurant,
            models::restaurant::Section,
            models::table::Table,
            models::table::ProvisionedTable,
            models::menu::MenuType,
            models::menu::Menu,
            models::event::EventType,
            models::event::RestaurantEvent,
            models::event::Booking,

            // --- Payloads ---
            handlers::user::UserPayload,
            handlers::city::CityPayload,
            handlers::restaurant::RestaurantPayload,
            handlers::section::SectionPayload,
            handlers::table::TablePayload,
            handlers::table::RepairedQrResponse,
            handlers::menu_type::MenuTypePayload,
            handlers::menu::MenuPayload,
            handlers::event::EventPayload,
            handlers::booking::BookingPayload,
            handlers::booking::AvailabilityResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Estado do serviço"),
        (name = "Users", description = "Clientes identificados pelo telefone"),
        (name = "Cities", description = "Cidades"),
        (name = "Restaurants", description = "Restaurantes"),
        (name = "Sections", description = "Seções (salões) de cada restaurante"),
        (name = "Tables", description = "Mesas e QR codes"),
        (name = "Menus", description = "Menus e tipos de menu"),
        (name = "Events", description = "Eventos do restaurante"),
        (name = "Bookings", description = "Reservas de mesas para eventos")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_the_booking_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/bookings"));
        assert!(doc.paths.paths.contains_key("/api/v1/tables/{id}/qr.png"));
    }
}
