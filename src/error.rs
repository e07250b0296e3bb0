/// Errors raised for invalid tree or rendering configuration.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The field width must be at least one character.")]
    ZeroFieldWidth,
    #[error("A value needs {required} characters but the field width is {width}.")]
    FieldWidthTooSmall { width: usize, required: usize },
    #[error("The field width {width} is too large to lay out the tree.")]
    FieldWidthTooLarge { width: usize },
    #[error("A tree of height {height} is too tall to lay out, the limit is {max}.")]
    TreeTooTall { height: usize, max: usize },
}
