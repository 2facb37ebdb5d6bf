// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// Catálogo embutido: (código do erro, en, ru, kk)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    (
        "validation_failed",
        "One or more fields are invalid.",
        "Одно или несколько полей заполнены неверно.",
        "Бір немесе бірнеше өріс қате толтырылған.",
    ),
    (
        "invalid_input",
        "Invalid input.",
        "Некорректные данные.",
        "Қате деректер.",
    ),
    (
        "not_found",
        "Resource not found.",
        "Ресурс не найден.",
        "Ресурс табылмады.",
    ),
    (
        "duplicate_in_scope",
        "A record with this value already exists.",
        "Запись с таким значением уже существует.",
        "Мұндай мәні бар жазба бұрыннан бар.",
    ),
    (
        "slot_unavailable",
        "This table is already booked for that date.",
        "Этот столик уже забронирован на эту дату.",
        "Бұл үстел осы күнге брондалған.",
    ),
    (
        "booking_not_found",
        "Booking not found.",
        "Бронирование не найдено.",
        "Брондау табылмады.",
    ),
    (
        "has_dependents",
        "The record still has dependent records.",
        "У записи есть зависимые записи.",
        "Жазбаның тәуелді жазбалары бар.",
    ),
    (
        "timeout",
        "The operation took too long.",
        "Операция заняла слишком много времени.",
        "Операция тым ұзақ орындалды.",
    ),
    (
        "internal_error",
        "An unexpected error occurred.",
        "Произошла непредвиденная ошибка.",
        "Күтпеген қате орын алды.",
    ),
];

/// Mensagens de erro traduzidas, indexadas por idioma e depois por código.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> =
            HashMap::new();

        for &(code, en, ru, kk) in CATALOG {
            messages.entry("en").or_default().insert(code, en);
            messages.entry("ru").or_default().insert(code, ru);
            messages.entry("kk").or_default().insert(code, kk);
        }

        Self { messages }
    }
}

impl I18nStore {
    /// Traduz `code` para `lang`, caindo para o inglês e por fim para o próprio código.
    pub fn translate<'a>(&'a self, lang: &str, code: &'a str) -> &'a str {
        let lang = match lang {
            // Cabeçalhos antigos usam "kz" para o cazaque
            "kz" => "kk",
            other => other,
        };

        self.messages
            .get(lang)
            .and_then(|catalog| catalog.get(code))
            .or_else(|| {
                self.messages
                    .get(DEFAULT_LANG)
                    .and_then(|catalog| catalog.get(code))
            })
            .copied()
            .unwrap_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_and_falls_back() {
        let store = I18nStore::default();

        assert_eq!(store.translate("ru", "not_found"), "Ресурс не найден.");
        assert_eq!(store.translate("kz", "not_found"), "Ресурс табылмады.");
        assert_eq!(store.translate("de", "not_found"), "Resource not found.");
        assert_eq!(store.translate("en", "unknown_code"), "unknown_code");
    }
}
