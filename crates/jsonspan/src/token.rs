/// A classified lexical unit of the JSON grammar.
///
/// Produced by [`JsonReader::read_next_token`](crate::JsonReader::read_next_token)
/// when a caller needs to branch on the shape of the next value before
/// committing to a typed read. The token is a bare tag: string and number
/// payloads are retrieved through the span-returning operations once the kind
/// is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonToken {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// Opening `"` of a string value or member name.
    String,
    /// First unit of a number (`-` or a digit).
    Number,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// The literal `null`.
    Null,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,
    /// No further significant input.
    EndOfInput,
}

impl JsonToken {
    /// Returns `true` for the scalar-value tokens (`String`, `Number`,
    /// `True`, `False`, `Null`).
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::True | Self::False | Self::Null
        )
    }
}
