/// Alias for `Result<T, DwError>`.
pub type DwResult<T> = Result<T, DwError>;

/// Errors that can occur when constructing or parsing core values.
#[derive(Debug, thiserror::Error)]
pub enum DwError {
    /// A string did not name a known ability.
    #[error("unknown ability: \"{0}\"")]
    UnknownAbility(String),

    /// A string did not name a known difficulty tier.
    #[error("unknown difficulty: \"{0}\" (expected easy, medium, hard, or deadly)")]
    UnknownDifficulty(String),

    /// A string did not name a known encounter type.
    #[error("unknown encounter type: \"{0}\" (expected combat, social, or exploration)")]
    UnknownEncounterType(String),
}
