// src/services/uniqueness.rs

//! Checagem "único dentro do escopo".
//!
//! Só lê. O resultado é um erro amigável antes da escrita; quem garante de
//! fato a unicidade é a restrição do banco (ou do store em memória), que
//! devolve o mesmo `DuplicateInScope`.

use std::fmt;

use crate::common::error::AppError;

/// Valor comparado dentro de um escopo.
pub trait ScopedKey: fmt::Display {
    fn collides(&self, other: &Self) -> bool;
}

/// Nome comparado sem diferenciar maiúsculas (também para cirílico).
#[derive(Debug, Clone, Copy)]
pub struct Name<'a>(pub &'a str);

impl ScopedKey for Name<'_> {
    fn collides(&self, other: &Self) -> bool {
        self.0.trim().to_lowercase() == other.0.trim().to_lowercase()
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim())
    }
}

/// Telefone: comparação exata.
#[derive(Debug, Clone, Copy)]
pub struct Phone<'a>(pub &'a str);

impl ScopedKey for Phone<'_> {
    fn collides(&self, other: &Self) -> bool {
        self.0.trim() == other.0.trim()
    }
}

impl fmt::Display for Phone<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim())
    }
}

// Número da mesa
impl ScopedKey for i32 {
    fn collides(&self, other: &Self) -> bool {
        self == other
    }
}

/// Falha com `DuplicateInScope` se algum irmão (que não seja o próprio
/// registro) colidir com o candidato.
pub fn ensure_unique<K, I>(
    entity: &'static str,
    own_id: Option<i64>,
    candidate: &K,
    siblings: I,
) -> Result<(), AppError>
where
    K: ScopedKey,
    I: IntoIterator<Item = (i64, K)>,
{
    let taken = siblings
        .into_iter()
        .any(|(id, key)| Some(id) != own_id && key.collides(candidate));

    if taken {
        return Err(AppError::duplicate(entity, candidate));
    }
    Ok(())
}

/// Numa atualização só vale checar de novo se o escopo ou a chave mudaram.
pub fn needs_recheck<K: ScopedKey>(old_scope: i64, new_scope: i64, old: &K, new: &K) -> bool {
    old_scope != new_scope || !old.collides(new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_collide_ignoring_case_and_padding() {
        assert!(Name("Terrace").collides(&Name(" terrace ")));
        assert!(Name("Веранда").collides(&Name("ВЕРАНДА")));
        assert!(!Name("Terrace").collides(&Name("Hall")));
    }

    #[test]
    fn own_record_is_not_a_conflict() {
        let siblings = vec![(1, Name("Terrace")), (2, Name("Hall"))];

        assert!(ensure_unique("section", Some(1), &Name("TERRACE"), siblings.clone()).is_ok());

        let err = ensure_unique("section", Some(2), &Name("terrace"), siblings).unwrap_err();
        match err {
            AppError::DuplicateInScope { entity, value } => {
                assert_eq!(entity, "section");
                assert_eq!(value, "terrace");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn table_numbers_compare_exactly() {
        let siblings = vec![(10, 3), (11, 4)];

        assert!(ensure_unique("table", None, &5, siblings.clone()).is_ok());
        assert!(ensure_unique("table", None, &3, siblings).is_err());
    }

    #[test]
    fn recheck_only_when_scope_or_key_changes() {
        assert!(!needs_recheck(1, 1, &Name("Terrace"), &Name("terrace")));
        assert!(needs_recheck(1, 1, &Name("Terrace"), &Name("Hall")));
        assert!(needs_recheck(1, 2, &Name("Terrace"), &Name("Terrace")));
        assert!(needs_recheck(5, 5, &3, &4));
    }
}
