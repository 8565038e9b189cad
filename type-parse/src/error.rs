use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypeParseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeParseError {
    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("`{name}` is not defined")]
    UnresolvedName { name: String },

    #[error("malformed qualified type: {text}")]
    MalformedQualifiedType { text: String },

    #[error("malformed type variable bound: {text}")]
    MalformedBound { text: String },

    #[error("cannot construct a `{target}` constant: {reason}")]
    UnsupportedConstructorTarget { target: String, reason: String },

    #[error("`{text}` is not a module")]
    NotAModule { text: String },

    #[error("expected a type, got `{found}`")]
    NotAType { found: String },

    #[error("cannot apply `{base}` to parameters {{{params}}}")]
    InvalidApplication { base: String, params: String },

    #[error("`{value}` is not a valid type parameter for `{var}`")]
    InvalidTypeParameter { var: String, value: String },
}
