//! Parsing of directive argument lists.
//!
//! Arguments arrive as the source text between the annotation's parentheses,
//! e.g. `access = AccessLevel.PACKAGE, staticName = "of"`. The text is
//! tokenised with `proc_macro2` and read as comma-separated `name = value`
//! pairs with `syn`.

use proc_macro2::TokenStream;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, Lit, Member, MetaNameValue, Token};

use crate::error::{Result, SynthError};
use crate::model::AccessLevel;

/// Options accepted by every constructor directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveOptions {
    /// Requested access; `NONE` disables generation.
    pub access: AccessLevel,
    /// Name of the static factory; empty for none.
    pub static_name: String,
    /// Explicit `suppressConstructorProperties`; `None` defers to settings.
    pub suppress_constructor_properties: Option<bool>,
}

impl DirectiveOptions {
    /// Parses an annotation argument list.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Directive`] for text that does not tokenise, for
    /// unknown option names and for values of the wrong shape.
    pub fn parse(args: &str) -> Result<Self> {
        let tokens: TokenStream = args.parse()?;
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(tokens)?;
        let mut options = Self::default();
        for pair in pairs {
            let key = pair
                .path
                .get_ident()
                .map(ToString::to_string)
                .ok_or_else(|| SynthError::directive("option names must be plain identifiers"))?;
            match key.as_str() {
                "access" => options.access = access_value(&pair.value)?,
                "staticName" => options.static_name = string_value(&key, &pair.value)?,
                "suppressConstructorProperties" => {
                    options.suppress_constructor_properties = Some(bool_value(&key, &pair.value)?);
                }
                other => return Err(SynthError::directive(format!("unknown option `{other}`"))),
            }
        }
        Ok(options)
    }
}

fn string_value(key: &str, value: &Expr) -> Result<String> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.value()),
        _ => Err(SynthError::directive(format!(
            "`{key}` expects a string literal"
        ))),
    }
}

fn bool_value(key: &str, value: &Expr) -> Result<bool> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(lit), ..
        }) => Ok(lit.value),
        _ => Err(SynthError::directive(format!("`{key}` expects `true` or `false`"))),
    }
}

/// Accepts `AccessLevel.X`, `lombok.AccessLevel.X`, a bare `X` and `"X"`.
fn access_value(value: &Expr) -> Result<AccessLevel> {
    let constant = match value {
        Expr::Field(field) => match &field.member {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(_) => String::new(),
        },
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => lit.value(),
        _ => String::new(),
    };
    AccessLevel::from_constant(&constant).ok_or_else(|| {
        SynthError::directive(format!(
            "`access` expects an AccessLevel constant, found `{}`",
            if constant.is_empty() { "expression" } else { constant.as_str() }
        ))
    })
}
