pub mod booking_repo;
pub mod city_repo;
pub mod event_repo;
pub mod memory;
pub mod menu_repo;
pub mod menu_type_repo;
mod pg_errors;
pub mod restaurant_repo;
pub mod section_repo;
pub mod store;
pub mod table_repo;
pub mod user_repo;

pub use booking_repo::BookingRepository;
pub use city_repo::CityRepository;
pub use event_repo::EventRepository;
pub use memory::MemoryStore;
pub use menu_repo::MenuRepository;
pub use menu_type_repo::MenuTypeRepository;
pub use restaurant_repo::RestaurantRepository;
pub use section_repo::SectionRepository;
pub use store::Stores;
pub use table_repo::TableRepository;
pub use user_repo::UserRepository;
