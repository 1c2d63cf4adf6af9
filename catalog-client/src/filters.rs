//! Filter state store: the single owner of the current filter criteria.
//!
//! An explicit injected container, created once per session and mutated only
//! through its setters. Enum-domain fields take typed setters so invalid
//! values are unrepresentable.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginFilter {
    #[default]
    All,
    Internal,
    External,
}

impl OriginFilter {
    /// Query-parameter value; `All` means no clause at all.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            OriginFilter::All => None,
            OriginFilter::Internal => Some("internal"),
            OriginFilter::External => Some("external"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Contract,
    Invoice,
    Report,
}

impl TypeFilter {
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Contract => Some("contract"),
            TypeFilter::Invoice => Some("invoice"),
            TypeFilter::Report => Some("report"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    search: String,
    origin: OriginFilter,
    doc_type: TypeFilter,
    date: Option<NaiveDate>,
    document_type: TypeFilter,
    emitter: String,
    tribute_value: String,
    liquid_value: String,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_origin(&mut self, origin: OriginFilter) {
        self.origin = origin;
    }

    pub fn set_type(&mut self, doc_type: TypeFilter) {
        self.doc_type = doc_type;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn set_document_type(&mut self, document_type: TypeFilter) {
        self.document_type = document_type;
    }

    pub fn set_emitter(&mut self, emitter: impl Into<String>) {
        self.emitter = emitter.into();
    }

    pub fn set_tribute_value(&mut self, value: impl Into<String>) {
        self.tribute_value = value.into();
    }

    pub fn set_liquid_value(&mut self, value: impl Into<String>) {
        self.liquid_value = value.into();
    }

    /// Reset the drawer filters to their defaults in one assignment, so an
    /// observer never sees a partially-cleared state. The search box and the
    /// top-level selects live on other UI surfaces and are untouched.
    pub fn clear_filters(&mut self) {
        let Self {
            search,
            origin,
            doc_type,
            ..
        } = std::mem::take(self);
        self.search = search;
        self.origin = origin;
        self.doc_type = doc_type;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn origin(&self) -> OriginFilter {
        self.origin
    }

    pub fn doc_type(&self) -> TypeFilter {
        self.doc_type
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn document_type(&self) -> TypeFilter {
        self.document_type
    }

    pub fn emitter(&self) -> &str {
        &self.emitter
    }

    pub fn tribute_value(&self) -> &str {
        &self.tribute_value
    }

    pub fn liquid_value(&self) -> &str {
        &self.liquid_value
    }
}
