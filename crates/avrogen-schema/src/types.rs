pub use avrogen_core::types::{LogicalType, Primitive, UnknownTypeName};

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::fmt;
use syn::{GenericArgument, PathArguments, Type};

///
/// DeclaredKind
///
/// The Rust-side type of a field, with `Option` stripped.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum DeclaredKind {
    Boolean,
    Bytes,
    Date,
    Double,
    Float,
    Instant,
    Int,
    Long,
    Other(String),
    Text,
}

impl DeclaredKind {
    /// Classify a type by its last path segment.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "bool" => Self::Boolean,
            "Date" => Self::Date,
            "f32" => Self::Float,
            "f64" => Self::Double,
            "i32" => Self::Int,
            "i64" => Self::Long,
            "OffsetDateTime" => Self::Instant,
            "String" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire primitive used when the field carries no overrides.
    #[must_use]
    pub const fn default_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Boolean => Some(Primitive::Boolean),
            Self::Bytes => Some(Primitive::Bytes),
            Self::Double => Some(Primitive::Double),
            Self::Float => Some(Primitive::Float),
            Self::Int => Some(Primitive::Int),
            Self::Long => Some(Primitive::Long),
            Self::Text => Some(Primitive::String),
            Self::Date | Self::Instant | Self::Other(_) => None,
        }
    }

    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Instant)
    }

    /// Whether the accessor can coerce this kind through `logical`.
    /// `Other` types bring their own `LogicalValue` impl.
    #[must_use]
    pub const fn accepts_logical(&self, logical: LogicalType) -> bool {
        match self {
            Self::Instant | Self::Other(_) => true,
            Self::Date => logical.is_date_only(),
            _ => false,
        }
    }

    #[must_use]
    pub fn rust_name(&self) -> &str {
        match self {
            Self::Boolean => "bool",
            Self::Bytes => "Vec<u8>",
            Self::Date => "Date",
            Self::Double => "f64",
            Self::Float => "f32",
            Self::Instant => "OffsetDateTime",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Other(name) => name,
            Self::Text => "String",
        }
    }
}

impl fmt::Display for DeclaredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

///
/// DeclaredType
///
/// `source` keeps the type as written so `Other` kinds can be re-emitted.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclaredType {
    pub kind: DeclaredKind,
    pub optional: bool,
    pub source: String,
}

impl DeclaredType {
    #[must_use]
    pub fn new(kind: DeclaredKind, optional: bool) -> Self {
        let source = if optional {
            format!("Option<{}>", kind.rust_name())
        } else {
            kind.rust_name().to_string()
        };

        Self {
            kind,
            optional,
            source,
        }
    }

    #[must_use]
    pub fn from_syn(ty: &Type) -> Self {
        let source = ty.to_token_stream().to_string();

        let (kind, optional) = match option_inner(ty) {
            Some(inner) => (classify(inner), true),
            None => (classify(ty), false),
        };

        Self {
            kind,
            optional,
            source,
        }
    }

    /// Parse a type written as text, e.g. `Option<OffsetDateTime>`.
    pub fn parse(text: &str) -> Result<Self, syn::Error> {
        let ty = syn::parse_str::<Type>(text)?;
        let mut declared = Self::from_syn(&ty);
        declared.source = text.trim().to_string();

        Ok(declared)
    }

    /// Fully-qualified tokens for a generated struct field.
    pub fn type_tokens(&self) -> Result<TokenStream, syn::Error> {
        let inner = match &self.kind {
            DeclaredKind::Boolean => quote!(bool),
            DeclaredKind::Bytes => quote!(::std::vec::Vec<u8>),
            DeclaredKind::Date => quote!(::avrogen::__reexports::time::Date),
            DeclaredKind::Double => quote!(f64),
            DeclaredKind::Float => quote!(f32),
            DeclaredKind::Instant => quote!(::avrogen::__reexports::time::OffsetDateTime),
            DeclaredKind::Int => quote!(i32),
            DeclaredKind::Long => quote!(i64),
            DeclaredKind::Text => quote!(::std::string::String),
            DeclaredKind::Other(_) => {
                return Ok(syn::parse_str::<Type>(&self.source)?.to_token_stream());
            }
        };

        Ok(if self.optional {
            quote!(::std::option::Option<#inner>)
        } else {
            inner
        })
    }

    /// Whether `#[derive(Default)]` is available for this type.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.optional
            || !matches!(
                self.kind,
                DeclaredKind::Date | DeclaredKind::Instant | DeclaredKind::Other(_)
            )
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

// option_inner
// the `T` of `Option<T>` / `std::option::Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    let ty = ungroup(ty);
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }

    single_generic(&last.arguments)
}

fn classify(ty: &Type) -> DeclaredKind {
    let ty = ungroup(ty);
    let Type::Path(path) = ty else {
        return DeclaredKind::Other(normalized(ty));
    };
    let Some(last) = path.path.segments.last() else {
        return DeclaredKind::Other(normalized(ty));
    };

    match &last.arguments {
        PathArguments::None => DeclaredKind::from_type_name(&last.ident.to_string()),
        args if last.ident == "Vec" => match single_generic(args) {
            Some(Type::Path(elem)) if elem.path.is_ident("u8") => DeclaredKind::Bytes,
            _ => DeclaredKind::Other(normalized(ty)),
        },
        _ => DeclaredKind::Other(normalized(ty)),
    }
}

fn single_generic(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = args else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn ungroup(mut ty: &Type) -> &Type {
    loop {
        match ty {
            Type::Group(g) => ty = &g.elem,
            Type::Paren(p) => ty = &p.elem,
            _ => return ty,
        }
    }
}

fn normalized(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

///
/// WireType
///
/// Resolved wire shape of one field.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WireType {
    pub primitive: Primitive,
    pub logical: Option<LogicalType>,
    pub nullable: bool,
}

impl WireType {
    #[must_use]
    pub const fn new(primitive: Primitive, logical: Option<LogicalType>, nullable: bool) -> Self {
        Self {
            primitive,
            logical,
            nullable,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.logical {
            Some(logical) => format!("{}({logical})", self.primitive),
            None => self.primitive.to_string(),
        };

        if self.nullable {
            write!(f, "[null, {base}]")
        } else {
            f.write_str(&base)
        }
    }
}

/// `::avrogen::types::Primitive::X`
#[must_use]
pub fn primitive_tokens(primitive: Primitive) -> TokenStream {
    let variant = match primitive {
        Primitive::Boolean => quote!(Boolean),
        Primitive::Bytes => quote!(Bytes),
        Primitive::Double => quote!(Double),
        Primitive::Float => quote!(Float),
        Primitive::Int => quote!(Int),
        Primitive::Long => quote!(Long),
        Primitive::Null => quote!(Null),
        Primitive::String => quote!(String),
    };

    quote!(::avrogen::types::Primitive::#variant)
}

/// `::avrogen::types::LogicalType::X`
#[must_use]
pub fn logical_tokens(logical: LogicalType) -> TokenStream {
    let variant = match logical {
        LogicalType::Date => quote!(Date),
        LogicalType::TimestampMicros => quote!(TimestampMicros),
        LogicalType::TimestampMillis => quote!(TimestampMillis),
    };

    quote!(::avrogen::types::LogicalType::#variant)
}

///
/// TESTS
///
