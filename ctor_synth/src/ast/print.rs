//! Single-line Java rendering of AST nodes.
//!
//! The output is meant for log events, error messages and test assertions;
//! it is not a pretty printer and makes no attempt at line breaking.

use std::fmt::{self, Display, Formatter, Write as _};

use super::{
    Annotation, Expr, Literal, MethodDecl, MethodKind, Modifiers, Param, Stmt, TypeExpr,
    TypeParam, WildcardBound,
};

/// Writes `items` separated by `sep`.
fn join<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_string_literal(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            other => f.write_char(other)?,
        }
    }
    f.write_char('"')
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Var(var) => f.write_str(&var.name),
            Self::Apply { base, args } => {
                write!(f, "{base}<")?;
                join(f, args, ", ")?;
                f.write_char('>')
            }
            Self::Array(elem) => write!(f, "{elem}[]"),
            Self::Wildcard(None) => f.write_char('?'),
            Self::Wildcard(Some(WildcardBound::Extends(bound))) => write!(f, "? extends {bound}"),
            Self::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
        }
    }
}

impl Display for TypeParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.bounds.is_empty() {
            f.write_str(" extends ")?;
            join(f, &self.bounds, " & ")?;
        }
        Ok(())
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.args.is_empty() {
            f.write_char('(')?;
            join(f, &self.args, ", ")?;
            f.write_char(')')?;
        }
        Ok(())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::This => f.write_str("this"),
            Self::Field { target, name } => write!(f, "{target}.{name}"),
            Self::Lit(Literal::Null) => f.write_str("null"),
            Self::Lit(Literal::Str(value)) => write_string_literal(f, value),
            Self::Eq(lhs, rhs) => write!(f, "{lhs} == {rhs}"),
            Self::ArrayInit(items) => {
                f.write_char('{')?;
                join(f, items, ", ")?;
                f.write_char('}')
            }
            Self::New { ty, args } => {
                write!(f, "new {ty}(")?;
                join(f, args, ", ")?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign { target, value } => write!(f, "{target} = {value};"),
            Self::If { cond, then } => write!(f, "if ({cond}) {then}"),
            Self::Throw(value) => write!(f, "throw {value};"),
            Self::Return(value) => write!(f, "return {value};"),
        }
    }
}

/// Renders annotations and keywords, each followed by a single space.
impl Display for Modifiers {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        if let Some(keyword) = self.visibility.keyword() {
            write!(f, "{keyword} ")?;
        }
        if self.is_static {
            f.write_str("static ")?;
        }
        if self.is_final {
            f.write_str("final ")?;
        }
        Ok(())
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.modifiers, self.ty, self.name)
    }
}

impl Display for MethodDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modifiers)?;
        if !self.type_params.is_empty() {
            f.write_char('<')?;
            join(f, &self.type_params, ", ")?;
            f.write_str("> ")?;
        }
        if let MethodKind::Method { returns } = &self.kind {
            write!(f, "{returns} ")?;
        }
        write!(f, "{}(", self.name)?;
        join(f, &self.params, ", ")?;
        f.write_str(") ")?;
        if self.body.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        join(f, &self.body, " ")?;
        f.write_str(" }")
    }
}
