//! HTTP verbs and mutation endpoints.

use std::fmt;

/// HTTP verb bound to a dispatch at construction time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Whether this verb may be bound to a mutation. Reads go through the
    /// query dispatch path instead.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Method::Get => "GET",
                Method::Post => "POST",
                Method::Put => "PUT",
                Method::Patch => "PATCH",
                Method::Delete => "DELETE",
            }
        )
    }
}

/// Target path of a mutation: fixed, or derived from the mutation variables.
///
/// Derived endpoints must be resolvable from the variables alone; a closure
/// capturing external mutable state defeats the point of binding the target
/// at construction time.
pub enum Endpoint<V> {
    /// A fixed path such as `/products`.
    Static(String),
    /// A path computed from the variables, e.g. `/products/{id}`.
    Derived(Box<dyn Fn(&V) -> String + Send + Sync>),
}

impl<V> Endpoint<V> {
    /// A fixed endpoint.
    pub fn fixed(path: impl Into<String>) -> Self {
        Endpoint::Static(path.into())
    }

    /// An endpoint computed from the mutation variables at dispatch time.
    pub fn derived(f: impl Fn(&V) -> String + Send + Sync + 'static) -> Self {
        Endpoint::Derived(Box::new(f))
    }

    /// Resolves the request path for the given variables.
    pub fn resolve(&self, variables: &V) -> String {
        match self {
            Endpoint::Static(path) => path.clone(),
            Endpoint::Derived(f) => f(variables),
        }
    }
}
