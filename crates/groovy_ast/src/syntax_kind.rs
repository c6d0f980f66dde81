//! SyntaxKind enum - all token and node kinds of the Groovy front end.
//!
//! Token kinds and node tags share one vocabulary, so an operator token can
//! become the root of the expression it applies to without a conversion.
//! [`SyntaxKind::name`] returns the stable upper-case tag used in tree dumps
//! and by downstream consumers (`LITERAL_if`, `METHOD_CALL`, `PLUS`, ...).

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! syntax_kinds {
    ($($variant:ident => $name:literal $(, $text:literal)?;)*) => {
        /// The kind of a token or of an AST node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($variant,)*
        }

        impl SyntaxKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$variant,)*];

            /// The stable tag name of this kind.
            pub fn name(self) -> &'static str {
                match self {
                    $(SyntaxKind::$variant => $name,)*
                }
            }

            /// The source text of kinds that always have the same spelling.
            pub fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $(SyntaxKind::$variant => syntax_kinds!(@text $($text)?),)*
                }
            }
        }
    };
    (@text $text:literal) => { Some($text) };
    (@text) => { None };
}

syntax_kinds! {
    // ========================================================================
    // Special tokens and trivia
    // ========================================================================
    Eof => "EOF";
    Nls => "NLS";
    ShebangComment => "SH_COMMENT";
    Whitespace => "WS";
    SingleLineComment => "SL_COMMENT";
    MultiLineComment => "ML_COMMENT";

    // ========================================================================
    // Literals
    // ========================================================================
    Ident => "IDENT";
    StringLiteral => "STRING_LITERAL";
    StringCtorStart => "STRING_CTOR_START";
    StringCtorMiddle => "STRING_CTOR_MIDDLE";
    StringCtorEnd => "STRING_CTOR_END";
    NumInt => "NUM_INT";
    NumLong => "NUM_LONG";
    NumBigInt => "NUM_BIG_INT";
    NumFloat => "NUM_FLOAT";
    NumDouble => "NUM_DOUBLE";
    NumBigDecimal => "NUM_BIG_DECIMAL";

    // ========================================================================
    // Punctuation
    // ========================================================================
    LParen => "LPAREN", "(";
    RParen => "RPAREN", ")";
    LBrack => "LBRACK", "[";
    RBrack => "RBRACK", "]";
    LCurly => "LCURLY", "{";
    RCurly => "RCURLY", "}";
    Colon => "COLON", ":";
    Comma => "COMMA", ",";
    Semi => "SEMI", ";";
    Dot => "DOT", ".";
    Question => "QUESTION", "?";
    Dollar => "DOLLAR", "$";
    At => "AT", "@";
    TripleDot => "TRIPLE_DOT", "...";
    RangeInclusive => "RANGE_INCLUSIVE", "..";
    StarDot => "STAR_DOT", "*.";
    QuestionDot => "QUESTION_DOT", "?.";
    ClosureOp => "CLOSURE_OP", "->";

    // ========================================================================
    // Operators
    // ========================================================================
    Plus => "PLUS", "+";
    Minus => "MINUS", "-";
    Star => "STAR", "*";
    Div => "DIV", "/";
    Mod => "MOD", "%";
    StarStar => "STAR_STAR", "**";
    Inc => "INC", "++";
    Dec => "DEC", "--";
    LNot => "LNOT", "!";
    BNot => "BNOT", "~";
    Band => "BAND", "&";
    Bor => "BOR", "|";
    Bxor => "BXOR", "^";
    Land => "LAND", "&&";
    Lor => "LOR", "||";
    Sl => "SL", "<<";
    Sr => "SR", ">>";
    Bsr => "BSR", ">>>";
    Lt => "LT", "<";
    Gt => "GT", ">";
    Le => "LE", "<=";
    Ge => "GE", ">=";
    Equal => "EQUAL", "==";
    NotEqual => "NOT_EQUAL", "!=";
    CompareTo => "COMPARE_TO", "<=>";
    RegexFind => "REGEX_FIND", "=~";
    RegexMatch => "REGEX_MATCH", "==~";

    // Assignment operators
    Assign => "ASSIGN", "=";
    PlusAssign => "PLUS_ASSIGN", "+=";
    MinusAssign => "MINUS_ASSIGN", "-=";
    StarAssign => "STAR_ASSIGN", "*=";
    DivAssign => "DIV_ASSIGN", "/=";
    ModAssign => "MOD_ASSIGN", "%=";
    StarStarAssign => "STAR_STAR_ASSIGN", "**=";
    SlAssign => "SL_ASSIGN", "<<=";
    SrAssign => "SR_ASSIGN", ">>=";
    BsrAssign => "BSR_ASSIGN", ">>>=";
    BandAssign => "BAND_ASSIGN", "&=";
    BorAssign => "BOR_ASSIGN", "|=";
    BxorAssign => "BXOR_ASSIGN", "^=";

    // ========================================================================
    // Keywords
    // ========================================================================
    AbstractKeyword => "ABSTRACT", "abstract";
    AnyKeyword => "LITERAL_any", "any";
    AsKeyword => "LITERAL_as", "as";
    AssertKeyword => "LITERAL_assert", "assert";
    BooleanKeyword => "LITERAL_boolean", "boolean";
    BreakKeyword => "LITERAL_break", "break";
    ByteKeyword => "LITERAL_byte", "byte";
    CaseKeyword => "LITERAL_case", "case";
    CatchKeyword => "LITERAL_catch", "catch";
    CharKeyword => "LITERAL_char", "char";
    ClassKeyword => "LITERAL_class", "class";
    ConstKeyword => "UNUSED_CONST", "const";
    ContinueKeyword => "LITERAL_continue", "continue";
    DefKeyword => "LITERAL_def", "def";
    DefaultKeyword => "LITERAL_default", "default";
    DoKeyword => "UNUSED_DO", "do";
    DoubleKeyword => "LITERAL_double", "double";
    ElseKeyword => "LITERAL_else", "else";
    EnumKeyword => "LITERAL_enum", "enum";
    ExtendsKeyword => "LITERAL_extends", "extends";
    FalseKeyword => "LITERAL_false", "false";
    FinalKeyword => "FINAL", "final";
    FinallyKeyword => "LITERAL_finally", "finally";
    FloatKeyword => "LITERAL_float", "float";
    ForKeyword => "LITERAL_for", "for";
    GotoKeyword => "UNUSED_GOTO", "goto";
    IfKeyword => "LITERAL_if", "if";
    ImplementsKeyword => "LITERAL_implements", "implements";
    ImportKeyword => "LITERAL_import", "import";
    InKeyword => "LITERAL_in", "in";
    InstanceofKeyword => "LITERAL_instanceof", "instanceof";
    IntKeyword => "LITERAL_int", "int";
    InterfaceKeyword => "LITERAL_interface", "interface";
    LongKeyword => "LITERAL_long", "long";
    NativeKeyword => "LITERAL_native", "native";
    NewKeyword => "LITERAL_new", "new";
    NullKeyword => "LITERAL_null", "null";
    PackageKeyword => "LITERAL_package", "package";
    PrivateKeyword => "LITERAL_private", "private";
    ProtectedKeyword => "LITERAL_protected", "protected";
    PublicKeyword => "LITERAL_public", "public";
    ReturnKeyword => "LITERAL_return", "return";
    ShortKeyword => "LITERAL_short", "short";
    StaticKeyword => "LITERAL_static", "static";
    StrictfpKeyword => "STRICTFP", "strictfp";
    SuperKeyword => "LITERAL_super", "super";
    SwitchKeyword => "LITERAL_switch", "switch";
    SynchronizedKeyword => "LITERAL_synchronized", "synchronized";
    ThisKeyword => "LITERAL_this", "this";
    ThreadsafeKeyword => "LITERAL_threadsafe", "threadsafe";
    ThrowKeyword => "LITERAL_throw", "throw";
    ThrowsKeyword => "LITERAL_throws", "throws";
    TransientKeyword => "LITERAL_transient", "transient";
    TrueKeyword => "LITERAL_true", "true";
    TryKeyword => "LITERAL_try", "try";
    VoidKeyword => "LITERAL_void", "void";
    VolatileKeyword => "LITERAL_volatile", "volatile";
    WhileKeyword => "LITERAL_while", "while";
    WithKeyword => "LITERAL_with", "with";

    // ========================================================================
    // Node tags (never produced by the lexer)
    // ========================================================================
    CompilationUnit => "COMPILATION_UNIT";
    PackageDef => "PACKAGE_DEF";
    Import => "IMPORT";
    StaticImport => "STATIC_IMPORT";
    ClassDef => "CLASS_DEF";
    InterfaceDef => "INTERFACE_DEF";
    EnumDef => "ENUM_DEF";
    AnnotationDef => "ANNOTATION_DEF";
    EnumConstantDef => "ENUM_CONSTANT_DEF";
    ObjBlock => "OBJBLOCK";
    MethodDef => "METHOD_DEF";
    AnnotationFieldDef => "ANNOTATION_FIELD_DEF";
    CtorIdent => "CTOR_IDENT";
    VariableDef => "VARIABLE_DEF";
    Parameters => "PARAMETERS";
    ParameterDef => "PARAMETER_DEF";
    VariableParameterDef => "VARIABLE_PARAMETER_DEF";
    ImplicitParameters => "IMPLICIT_PARAMETERS";
    StaticInit => "STATIC_INIT";
    InstanceInit => "INSTANCE_INIT";
    Modifiers => "MODIFIERS";
    Annotations => "ANNOTATIONS";
    Annotation => "ANNOTATION";
    AnnotationMemberValuePair => "ANNOTATION_MEMBER_VALUE_PAIR";
    Type => "TYPE";
    ArrayDeclarator => "ARRAY_DECLARATOR";
    TypeArguments => "TYPE_ARGUMENTS";
    TypeArgument => "TYPE_ARGUMENT";
    WildcardType => "WILDCARD_TYPE";
    TypeParameters => "TYPE_PARAMETERS";
    TypeParameter => "TYPE_PARAMETER";
    TypeUpperBounds => "TYPE_UPPER_BOUNDS";
    TypeLowerBounds => "TYPE_LOWER_BOUNDS";
    ExtendsClause => "EXTENDS_CLAUSE";
    ImplementsClause => "IMPLEMENTS_CLAUSE";
    Slist => "SLIST";
    Expr => "EXPR";
    EmptyStat => "EMPTY_STAT";
    LabeledStat => "LABELED_STAT";
    ForInit => "FOR_INIT";
    ForCondition => "FOR_CONDITION";
    ForIterator => "FOR_ITERATOR";
    ForInIterable => "FOR_IN_ITERABLE";
    ForEachClause => "FOR_EACH_CLAUSE";
    CaseGroup => "CASE_GROUP";
    CtorCall => "CTOR_CALL";
    SuperCtorCall => "SUPER_CTOR_CALL";
    Elist => "ELIST";
    MethodCall => "METHOD_CALL";
    IndexOp => "INDEX_OP";
    TypeCast => "TYPECAST";
    UnaryMinus => "UNARY_MINUS";
    UnaryPlus => "UNARY_PLUS";
    PostInc => "POST_INC";
    PostDec => "POST_DEC";
    SpreadArg => "SPREAD_ARG";
    SpreadMapArg => "SPREAD_MAP_ARG";
    OptionalDot => "OPTIONAL_DOT";
    SpreadDot => "SPREAD_DOT";
    MemberPointer => "MEMBER_POINTER";
    DynamicMember => "DYNAMIC_MEMBER";
    SelectSlot => "SELECT_SLOT";
    ListConstructor => "LIST_CONSTRUCTOR";
    MapConstructor => "MAP_CONSTRUCTOR";
    LabeledArg => "LABELED_ARG";
    ClosableBlock => "CLOSABLE_BLOCK";
    StringConstructor => "STRING_CONSTRUCTOR";
    RangeExclusive => "RANGE_EXCLUSIVE";
}

// Marker constants for SyntaxKind ranges.
impl SyntaxKind {
    pub const FIRST_TRIVIA: SyntaxKind = SyntaxKind::Whitespace;
    pub const LAST_TRIVIA: SyntaxKind = SyntaxKind::MultiLineComment;
    pub const FIRST_STRING: SyntaxKind = SyntaxKind::StringLiteral;
    pub const LAST_STRING: SyntaxKind = SyntaxKind::StringCtorEnd;
    pub const FIRST_NUMBER: SyntaxKind = SyntaxKind::NumInt;
    pub const LAST_NUMBER: SyntaxKind = SyntaxKind::NumBigDecimal;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::Assign;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::BxorAssign;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::CompilationUnit;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whitespace and ordinary comments. A `#!` line is not trivia: the
    /// parser consumes it at the start of a unit.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.in_range(Self::FIRST_TRIVIA, Self::LAST_TRIVIA)
    }

    /// A string literal or one of the three string-constructor pieces.
    #[inline]
    pub fn is_string(self) -> bool {
        self.in_range(Self::FIRST_STRING, Self::LAST_STRING)
    }

    #[inline]
    pub fn is_number(self) -> bool {
        self.in_range(Self::FIRST_NUMBER, Self::LAST_NUMBER)
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// A tag only the parser creates.
    #[inline]
    pub fn is_node_tag(self) -> bool {
        self as u16 >= Self::FIRST_NODE as u16
    }

    /// Whether this kind is a declaration modifier keyword.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::PrivateKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::TransientKeyword
                | SyntaxKind::FinalKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::NativeKeyword
                | SyntaxKind::ThreadsafeKeyword
                | SyntaxKind::SynchronizedKeyword
                | SyntaxKind::VolatileKeyword
                | SyntaxKind::StrictfpKeyword
        )
    }

    /// Whether this kind names a primitive type (or `void`/`any`).
    pub fn is_builtin_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::VoidKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::ByteKeyword
                | SyntaxKind::CharKeyword
                | SyntaxKind::ShortKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::FloatKeyword
                | SyntaxKind::LongKeyword
                | SyntaxKind::DoubleKeyword
                | SyntaxKind::AnyKeyword
        )
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        if self.is_keyword() {
            self.fixed_text()
        } else {
            None
        }
    }

    /// Iterate over every keyword kind.
    pub fn keywords() -> impl Iterator<Item = SyntaxKind> {
        Self::ALL.iter().copied().filter(|k| k.is_keyword())
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SyntaxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(SyntaxKind::IfKeyword.name(), "LITERAL_if");
        assert_eq!(SyntaxKind::FinalKeyword.name(), "FINAL");
        assert_eq!(SyntaxKind::ClosableBlock.to_string(), "CLOSABLE_BLOCK");
        assert_eq!(SyntaxKind::Bsr.fixed_text(), Some(">>>"));
        assert_eq!(SyntaxKind::Ident.fixed_text(), None);
    }

    #[test]
    fn test_ranges() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(!SyntaxKind::Nls.is_trivia());
        assert!(!SyntaxKind::ShebangComment.is_trivia());
        assert!(SyntaxKind::StringCtorMiddle.is_string());
        assert!(SyntaxKind::NumBigDecimal.is_number());
        assert!(SyntaxKind::BsrAssign.is_assignment_operator());
        assert!(!SyntaxKind::Equal.is_assignment_operator());
        assert!(SyntaxKind::Slist.is_node_tag());
        assert!(!SyntaxKind::WithKeyword.is_node_tag());
    }

    #[test]
    fn test_keyword_table_size() {
        assert_eq!(SyntaxKind::keywords().count(), 59);
        assert!(SyntaxKind::keywords().all(|k| k.keyword_text().is_some()));
        assert_eq!(SyntaxKind::Plus.keyword_text(), None);
    }

    #[test]
    fn test_modifiers_and_builtin_types() {
        assert!(SyntaxKind::StrictfpKeyword.is_modifier());
        assert!(!SyntaxKind::DefKeyword.is_modifier());
        assert!(SyntaxKind::AnyKeyword.is_builtin_type());
        assert!(!SyntaxKind::Ident.is_builtin_type());
    }
}
