use flex_error::define_error;

define_error! {
    IdentifierError {
        Empty
            |_| { "identifier cannot be blank" },
        InvalidLength
            { id: String, length: usize, min: usize, max: usize }
            |e| {
                format!("identifier {} has invalid length {}, must be between {} and {} characters",
                    e.id, e.length, e.min, e.max)
            },
        InvalidCharacter
            { id: String }
            |e| { format!("identifier {} must only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`", e.id) },
    }
}
