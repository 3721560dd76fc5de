use std::fmt;

/// One of the named record lists inside the hub document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Afazeres,
    Checklist,
    CheckStatus,
    Metas,
    Financeiro,
    Notas,
    GastosFixos,
    Investimentos,
}

impl Collection {
    pub const ALL: [Self; 8] = [
        Self::Afazeres,
        Self::Checklist,
        Self::CheckStatus,
        Self::Metas,
        Self::Financeiro,
        Self::Notas,
        Self::GastosFixos,
        Self::Investimentos,
    ];

    /// Field name the collection uses inside the persisted document.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Afazeres => "afazeres",
            Self::Checklist => "checklist",
            Self::CheckStatus => "checkStatus",
            Self::Metas => "metas",
            Self::Financeiro => "financeiro",
            Self::Notas => "notas",
            Self::GastosFixos => "gastosFixos",
            Self::Investimentos => "investimentos",
        }
    }

    /// Record field used to address single items.
    pub const fn key_field(self) -> &'static str {
        match self {
            Self::CheckStatus => "key",
            _ => "id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
