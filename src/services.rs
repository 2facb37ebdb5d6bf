pub mod booking_service;
pub mod city_service;
pub mod event_service;
pub mod menu_service;
pub mod menu_type_service;
pub mod qr_service;
pub mod restaurant_service;
pub mod section_service;
pub mod table_service;
pub mod uniqueness;
pub mod user_service;

pub use booking_service::BookingService;
pub use city_service::CityService;
pub use event_service::EventService;
pub use menu_service::MenuService;
pub use menu_type_service::MenuTypeService;
pub use qr_service::QrService;
pub use restaurant_service::RestaurantService;
pub use section_service::SectionService;
pub use table_service::TableService;
pub use user_service::UserService;

use crate::common::error::AppError;

/// Texto obrigatório: devolve o valor sem espaços nas pontas, com pelo menos
/// `min_chars` caracteres.
pub(crate) fn required_text(field: &str, value: &str, min_chars: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min_chars.max(1) {
        return Err(AppError::invalid(format!(
            "{field} deve ter pelo menos {} caractere(s)",
            min_chars.max(1)
        )));
    }
    Ok(trimmed.to_string())
}

// Campos opcionais: vazio vira None
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
