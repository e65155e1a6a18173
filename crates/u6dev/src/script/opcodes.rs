//! Byte classes and opcodes of the conversation script bytecode.
//!
//! Only the opcodes that matter for finding text are named here. The scanner
//! needs to know how many operand bytes each control opcode consumes, which is
//! described by an [`OperandRule`] per byte in an [`OpcodeTable`].

/// Bytes that can appear inside an expression without ending it.
const VALUE_OPCODES: &[u8] = &[
    0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x90, 0x91, 0x92, 0x93, 0x94, 0x95, 0x9A, 0x9B, 0x9D,
    0x9F, 0xA0, 0xA7, 0xAB, 0xB2, 0xB3, 0xB4, 0xB7, 0xBB, 0xC6, 0xC7, 0xCA, 0xCC, 0xD7, 0xDA,
    0xDC, 0xDD, 0xE0, 0xE1, 0xE2, 0xE3, 0xE4,
];

/// Returns true for bytes that belong to a text run.
#[must_use]
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x0A | 0x20..=0x7B | 0x7E)
}

#[must_use]
pub fn is_value_opcode(byte: u8) -> bool {
    VALUE_OPCODES.contains(&byte)
}

/// The literal width announced by a data-size prefix byte.
#[must_use]
pub fn data_size(byte: u8) -> Option<usize> {
    match byte {
        0xD2 => Some(4),
        0xD3 => Some(1),
        0xD4 => Some(2),
        _ => None,
    }
}

/// Returns true for bytes that start a statement and end any expression
/// being skipped.
#[must_use]
pub fn is_control(byte: u8) -> bool {
    if is_value_opcode(byte) || data_size(byte).is_some() {
        return false;
    }
    byte >= 0xA1 || byte == 0x9C || byte == 0x9E
}

macro_rules! opcodes {
    ($($name:ident = $byte:literal => $rule:expr,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $($name,)*
        }

        impl Opcode {
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name,)*];

            #[must_use]
            pub fn byte(self) -> u8 {
                match self {
                    $(Opcode::$name => $byte,)*
                }
            }

            #[must_use]
            pub fn from_byte(byte: u8) -> Option<Self> {
                match byte {
                    $($byte => Some(Opcode::$name),)*
                    _ => None,
                }
            }

            /// How the standard script format lays out this opcode's operands.
            #[must_use]
            pub fn standard_rule(self) -> OperandRule {
                match self {
                    $(Opcode::$name => $rule,)*
                }
            }
        }
    };
}

opcodes! {
    Horse = 0x9C => OperandRule::Expressions(1),
    Sleep = 0x9E => OperandRule::None,
    If = 0xA1 => OperandRule::Expressions(1),
    EndIf = 0xA2 => OperandRule::None,
    Else = 0xA3 => OperandRule::None,
    SetFlag = 0xA4 => OperandRule::Expressions(2),
    ClearFlag = 0xA5 => OperandRule::Expressions(2),
    Declare = 0xA6 => OperandRule::Expressions(2),
    Assign = 0xA8 => OperandRule::Expressions(1),
    Jump = 0xB0 => OperandRule::Fixed(4),
    DPrint = 0xB5 => OperandRule::Expressions(2),
    Bye = 0xB6 => OperandRule::None,
    New = 0xB9 => OperandRule::Expressions(4),
    Delete = 0xBA => OperandRule::Expressions(4),
    Inventory = 0xBE => OperandRule::None,
    Portrait = 0xBF => OperandRule::Expressions(1),
    AddKarma = 0xC4 => OperandRule::Expressions(1),
    SubKarma = 0xC5 => OperandRule::Expressions(1),
    Give = 0xC9 => OperandRule::Expressions(4),
    Wait = 0xCB => OperandRule::None,
    WorkType = 0xCD => OperandRule::Expressions(2),
    Resurrect = 0xD6 => OperandRule::Expressions(1),
    SetName = 0xD8 => OperandRule::Expressions(1),
    Heal = 0xD9 => OperandRule::Expressions(1),
    Cure = 0xDB => OperandRule::Expressions(1),
    EndAnswer = 0xEE => OperandRule::None,
    Keywords = 0xEF => OperandRule::Text { prefix: 0, role: TextRole::Keywords },
    Look = 0xF1 => OperandRule::Text { prefix: 0, role: TextRole::Description },
    Converse = 0xF2 => OperandRule::None,
    Prefix = 0xF3 => OperandRule::None,
    Answer = 0xF6 => OperandRule::None,
    Ask = 0xF7 => OperandRule::None,
    AskChars = 0xF8 => OperandRule::Text { prefix: 0, role: TextRole::Discard },
    InputStr = 0xF9 => OperandRule::Expressions(2),
    Input = 0xFB => OperandRule::Expressions(2),
    InputNum = 0xFC => OperandRule::Expressions(2),
    Ident = 0xFF => OperandRule::Text { prefix: 1, role: TextRole::Discard },
}

/// What the text run after a text-bearing opcode means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// The NPC's "look" description.
    Description,
    /// Words the player can ask about.
    Keywords,
    /// Not interesting for extraction, such as the characters accepted by a
    /// one-key question.
    Discard,
}

/// How many bytes follow an opcode, and what they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandRule {
    /// No operands.
    None,
    /// A fixed number of raw bytes, such as a jump target.
    Fixed(usize),
    /// A single value: one byte, plus a literal if that byte is a data-size
    /// prefix.
    Value,
    /// The given number of expressions, each a run of values ending at the
    /// next control or printable byte.
    Expressions(usize),
    /// `prefix` raw bytes followed by a text run.
    Text { prefix: usize, role: TextRole },
    /// The script ends here.
    EndOfScript,
}

/// Maps each byte to the operand rule of the opcode it encodes.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    rules: [Option<OperandRule>; 256],
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl OpcodeTable {
    /// A table with no rules. Every control byte is skipped on its own.
    #[must_use]
    pub fn empty() -> Self {
        OpcodeTable { rules: [None; 256] }
    }

    /// The rules of the game's conversation scripts.
    #[must_use]
    pub fn standard() -> Self {
        Opcode::ALL.iter().fold(Self::empty(), |table, &opcode| {
            table.with_rule(opcode.byte(), opcode.standard_rule())
        })
    }

    /// Returns the table with the rule for `byte` replaced.
    #[must_use]
    pub fn with_rule(mut self, byte: u8, rule: OperandRule) -> Self {
        self.rules[usize::from(byte)] = Some(rule);
        self
    }

    #[must_use]
    pub fn rule(&self, byte: u8) -> Option<OperandRule> {
        self.rules[usize::from(byte)]
    }
}
