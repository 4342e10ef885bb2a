use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArithError {
    #[error("input is not finite: {0}")]
    NonFiniteInput(String),

    #[error("zeta has a pole at s = 1")]
    Pole,

    #[error("division by zero in fixed-point arithmetic")]
    DivisionByZero,

    #[error("argument outside the domain of {0}")]
    Domain(&'static str),

    #[error("out of range: {0}")]
    Overflow(String),
}
