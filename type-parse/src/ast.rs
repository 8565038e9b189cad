use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),                         // Name
    Dot(Box<Expr>, Box<Expr>),             // parent.name
    Curly(Box<Expr>, Vec<Expr>),           // Base{P1, ..., Pn}
    Where(Box<Expr>, Vec<Expr>),           // Body where {V1, ..., Vn}
    UpperBound(Box<Expr>),                 // <:X
    LowerBound(Box<Expr>),                 // >:X
    Compare(Box<Expr>, Vec<(Rel, Expr)>),  // A <: B <: C
    Call(Box<Expr>, Vec<Expr>),            // f(A1, ..., An)
    Lit(Lit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rel {
    Sub,   // <:
    Super, // >:
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Symbol(String),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Dot(parent, name) => write!(f, "{}.{}", parent, name),
            Expr::Curly(base, params) => write!(f, "{}{{{}}}", base, params.iter().format(", ")),
            Expr::Where(body, vars) => match vars.as_slice() {
                [var] => write!(f, "{} where {}", body, var),
                _ => write!(f, "{} where {{{}}}", body, vars.iter().format(", ")),
            },
            Expr::UpperBound(upper) => write!(f, "<:{}", upper),
            Expr::LowerBound(lower) => write!(f, ">:{}", lower),
            Expr::Compare(first, rest) => {
                write!(f, "{}", first)?;
                for (rel, operand) in rest {
                    write!(f, " {} {}", rel, operand)?;
                }
                Ok(())
            }
            Expr::Call(callee, args) => write!(f, "{}({})", callee, args.iter().format(", ")),
            Expr::Lit(lit) => write!(f, "{}", lit),
        }
    }
}

impl std::fmt::Display for Rel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rel::Sub => write!(f, "<:"),
            Rel::Super => write!(f, ">:"),
        }
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lit::Int(n) => write!(f, "{}", n),
            Lit::Float(x) => write!(f, "{:?}", x),
            Lit::Bool(b) => write!(f, "{}", b),
            Lit::Char(c) => write!(f, "{:?}", c),
            Lit::Str(s) => write!(f, "{:?}", s),
            Lit::Symbol(s) => write!(f, ":{}", s),
        }
    }
}

pub(crate) fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

pub(crate) fn unescape_char(body: &str) -> Option<char> {
    let decoded = unescape(body)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    mod display {
        use super::*;

        #[test]
        fn curly_with_restriction() {
            let expr = Expr::Curly(
                Box::new(ident("Vector")),
                vec![Expr::UpperBound(Box::new(ident("Number")))],
            );
            assert_eq!(expr.to_string(), "Vector{<:Number}");
        }

        #[test]
        fn where_with_several_vars() {
            let expr = Expr::Where(Box::new(ident("T")), vec![ident("T"), ident("S")]);
            assert_eq!(expr.to_string(), "T where {T, S}");
        }

        #[test]
        fn two_sided_comparison() {
            let expr = Expr::Compare(
                Box::new(ident("Int")),
                vec![(Rel::Sub, ident("T")), (Rel::Sub, ident("Real"))],
            );
            assert_eq!(expr.to_string(), "Int <: T <: Real");
        }

        #[test]
        fn literals() {
            let expr = Expr::Call(
                Box::new(ident("f")),
                vec![
                    Expr::Lit(Lit::Float(1.0)),
                    Expr::Lit(Lit::Symbol("a".to_string())),
                    Expr::Lit(Lit::Char('x')),
                ],
            );
            assert_eq!(expr.to_string(), "f(1.0, :a, 'x')");
        }
    }

    mod escapes {
        use super::*;

        #[test]
        fn plain_and_escaped() {
            assert_eq!(unescape(r#"a\"b\n"#), Some("a\"b\n".to_string()));
        }

        #[test]
        fn unknown_escape_is_rejected() {
            assert_eq!(unescape(r"\q"), None);
        }

        #[test]
        fn single_char() {
            assert_eq!(unescape_char(r"\'"), Some('\''));
            assert_eq!(unescape_char("ab"), None);
        }
    }
}
