//! PEMDAS lexer DFA and SLR parse tables in generator output form.

use pgrun::{Action, DfaRange, ParentSource, Production, Shaping};

pub(super) const TRANSITIONS: &[(usize, &[DfaRange])] = &[
    (
        0,
        &[
            DfaRange::new(0x09, 0x0a, 1),
            DfaRange::new(0x0d, 0x0d, 1),
            DfaRange::new(0x20, 0x20, 1), // ' '
            DfaRange::new(0x23, 0x23, 2), // '#'
            DfaRange::new(0x25, 0x25, 3), // '%'
            DfaRange::new(0x28, 0x28, 4), // '('
            DfaRange::new(0x29, 0x29, 5), // ')'
            DfaRange::new(0x2a, 0x2a, 9), // '*'
            DfaRange::new(0x2b, 0x2b, 6), // '+'
            DfaRange::new(0x2d, 0x2d, 7), // '-'
            DfaRange::new(0x2f, 0x2f, 8), // '/'
            DfaRange::new(0x30, 0x39, 11), // '0'..='9'
        ],
    ),
    (
        1,
        &[
            DfaRange::new(0x09, 0x0a, 1),
            DfaRange::new(0x0d, 0x0d, 1),
            DfaRange::new(0x20, 0x20, 1), // ' '
        ],
    ),
    (
        2,
        &[
            DfaRange::new(0x00, 0x09, 2),
            DfaRange::new(0x0b, 0x10ffff, 2),
        ],
    ),
    (
        9,
        &[
            DfaRange::new(0x2a, 0x2a, 10), // '*'
        ],
    ),
    (
        11,
        &[
            DfaRange::new(0x30, 0x39, 11), // '0'..='9'
        ],
    ),
];

pub(super) const ACCEPTS: &[(usize, &str)] = &[
    (1, "!whitespace"),
    (2, "!comment"),
    (3, "modulo"),
    (4, "lparen"),
    (5, "rparen"),
    (6, "plus"),
    (7, "minus"),
    (8, "divide"),
    (9, "times"),
    (10, "exponentiation"),
    (11, "int_literal"),
];

pub(super) const ACTIONS: &[(usize, &[(&str, Action)])] = &[
    (
        0,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        1,
        &[
            ("EOF", Action::Accept),
        ],
    ),
    (
        2,
        &[
            ("EOF", Action::Reduce(1)),
            ("minus", Action::Shift(12)),
            ("plus", Action::Shift(11)),
        ],
    ),
    (
        3,
        &[
            ("EOF", Action::Reduce(4)),
            ("divide", Action::Shift(14)),
            ("minus", Action::Reduce(4)),
            ("modulo", Action::Shift(15)),
            ("plus", Action::Reduce(4)),
            ("rparen", Action::Reduce(4)),
            ("times", Action::Shift(13)),
        ],
    ),
    (
        4,
        &[
            ("EOF", Action::Reduce(8)),
            ("divide", Action::Reduce(8)),
            ("minus", Action::Reduce(8)),
            ("modulo", Action::Reduce(8)),
            ("plus", Action::Reduce(8)),
            ("rparen", Action::Reduce(8)),
            ("times", Action::Reduce(8)),
        ],
    ),
    (
        5,
        &[
            ("EOF", Action::Reduce(10)),
            ("divide", Action::Reduce(10)),
            ("exponentiation", Action::Shift(16)),
            ("minus", Action::Reduce(10)),
            ("modulo", Action::Reduce(10)),
            ("plus", Action::Reduce(10)),
            ("rparen", Action::Reduce(10)),
            ("times", Action::Reduce(10)),
        ],
    ),
    (
        6,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        7,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        8,
        &[
            ("EOF", Action::Reduce(13)),
            ("divide", Action::Reduce(13)),
            ("exponentiation", Action::Reduce(13)),
            ("minus", Action::Reduce(13)),
            ("modulo", Action::Reduce(13)),
            ("plus", Action::Reduce(13)),
            ("rparen", Action::Reduce(13)),
            ("times", Action::Reduce(13)),
        ],
    ),
    (
        9,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        10,
        &[
            ("EOF", Action::Reduce(15)),
            ("divide", Action::Reduce(15)),
            ("exponentiation", Action::Reduce(15)),
            ("minus", Action::Reduce(15)),
            ("modulo", Action::Reduce(15)),
            ("plus", Action::Reduce(15)),
            ("rparen", Action::Reduce(15)),
            ("times", Action::Reduce(15)),
        ],
    ),
    (
        11,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        12,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        13,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        14,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        15,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        16,
        &[
            ("int_literal", Action::Shift(10)),
            ("lparen", Action::Shift(9)),
            ("minus", Action::Shift(6)),
            ("plus", Action::Shift(7)),
        ],
    ),
    (
        17,
        &[
            ("EOF", Action::Reduce(11)),
            ("divide", Action::Reduce(11)),
            ("exponentiation", Action::Reduce(11)),
            ("minus", Action::Reduce(11)),
            ("modulo", Action::Reduce(11)),
            ("plus", Action::Reduce(11)),
            ("rparen", Action::Reduce(11)),
            ("times", Action::Reduce(11)),
        ],
    ),
    (
        18,
        &[
            ("EOF", Action::Reduce(12)),
            ("divide", Action::Reduce(12)),
            ("exponentiation", Action::Reduce(12)),
            ("minus", Action::Reduce(12)),
            ("modulo", Action::Reduce(12)),
            ("plus", Action::Reduce(12)),
            ("rparen", Action::Reduce(12)),
            ("times", Action::Reduce(12)),
        ],
    ),
    (
        19,
        &[
            ("minus", Action::Shift(12)),
            ("plus", Action::Shift(11)),
            ("rparen", Action::Shift(26)),
        ],
    ),
    (
        20,
        &[
            ("EOF", Action::Reduce(2)),
            ("divide", Action::Shift(14)),
            ("minus", Action::Reduce(2)),
            ("modulo", Action::Shift(15)),
            ("plus", Action::Reduce(2)),
            ("rparen", Action::Reduce(2)),
            ("times", Action::Shift(13)),
        ],
    ),
    (
        21,
        &[
            ("EOF", Action::Reduce(3)),
            ("divide", Action::Shift(14)),
            ("minus", Action::Reduce(3)),
            ("modulo", Action::Shift(15)),
            ("plus", Action::Reduce(3)),
            ("rparen", Action::Reduce(3)),
            ("times", Action::Shift(13)),
        ],
    ),
    (
        22,
        &[
            ("EOF", Action::Reduce(5)),
            ("divide", Action::Reduce(5)),
            ("minus", Action::Reduce(5)),
            ("modulo", Action::Reduce(5)),
            ("plus", Action::Reduce(5)),
            ("rparen", Action::Reduce(5)),
            ("times", Action::Reduce(5)),
        ],
    ),
    (
        23,
        &[
            ("EOF", Action::Reduce(6)),
            ("divide", Action::Reduce(6)),
            ("minus", Action::Reduce(6)),
            ("modulo", Action::Reduce(6)),
            ("plus", Action::Reduce(6)),
            ("rparen", Action::Reduce(6)),
            ("times", Action::Reduce(6)),
        ],
    ),
    (
        24,
        &[
            ("EOF", Action::Reduce(7)),
            ("divide", Action::Reduce(7)),
            ("minus", Action::Reduce(7)),
            ("modulo", Action::Reduce(7)),
            ("plus", Action::Reduce(7)),
            ("rparen", Action::Reduce(7)),
            ("times", Action::Reduce(7)),
        ],
    ),
    (
        25,
        &[
            ("EOF", Action::Reduce(9)),
            ("divide", Action::Reduce(9)),
            ("minus", Action::Reduce(9)),
            ("modulo", Action::Reduce(9)),
            ("plus", Action::Reduce(9)),
            ("rparen", Action::Reduce(9)),
            ("times", Action::Reduce(9)),
        ],
    ),
    (
        26,
        &[
            ("EOF", Action::Reduce(14)),
            ("divide", Action::Reduce(14)),
            ("exponentiation", Action::Reduce(14)),
            ("minus", Action::Reduce(14)),
            ("modulo", Action::Reduce(14)),
            ("plus", Action::Reduce(14)),
            ("rparen", Action::Reduce(14)),
            ("times", Action::Reduce(14)),
        ],
    ),
];

pub(super) const GOTOS: &[(usize, &[(&str, usize)])] = &[
    (
        0,
        &[
            ("Atom", 8),
            ("Power", 4),
            ("Product", 3),
            ("Root", 1),
            ("Sum", 2),
            ("Unary", 5),
        ],
    ),
    (
        6,
        &[
            ("Atom", 8),
            ("Unary", 17),
        ],
    ),
    (
        7,
        &[
            ("Atom", 8),
            ("Unary", 18),
        ],
    ),
    (
        9,
        &[
            ("Atom", 8),
            ("Power", 4),
            ("Product", 3),
            ("Sum", 19),
            ("Unary", 5),
        ],
    ),
    (
        11,
        &[
            ("Atom", 8),
            ("Power", 4),
            ("Product", 20),
            ("Unary", 5),
        ],
    ),
    (
        12,
        &[
            ("Atom", 8),
            ("Power", 4),
            ("Product", 21),
            ("Unary", 5),
        ],
    ),
    (
        13,
        &[
            ("Atom", 8),
            ("Power", 22),
            ("Unary", 5),
        ],
    ),
    (
        14,
        &[
            ("Atom", 8),
            ("Power", 23),
            ("Unary", 5),
        ],
    ),
    (
        15,
        &[
            ("Atom", 8),
            ("Power", 24),
            ("Unary", 5),
        ],
    ),
    (
        16,
        &[
            ("Atom", 8),
            ("Power", 25),
            ("Unary", 5),
        ],
    ),
];

pub(super) fn productions() -> Vec<Production> {
    vec![
        // 0: __start -> Root
        Production::new("__start", 1, Shaping::Default),
        // 1: Root -> Sum
        Production::new("Root", 1, Shaping::Default),
        // 2: Sum -> Sum plus Product
        Production::new(
            "Sum",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 3: Sum -> Sum minus Product
        Production::new(
            "Sum",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 4: Sum -> Product
        Production::new("Sum", 1, Shaping::Default),
        // 5: Product -> Product times Power
        Production::new(
            "Product",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 6: Product -> Product divide Power
        Production::new(
            "Product",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 7: Product -> Product modulo Power
        Production::new(
            "Product",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 8: Product -> Power
        Production::new("Product", 1, Shaping::Default),
        // 9: Power -> Unary exponentiation Power
        Production::new(
            "Power",
            3,
            Shaping::Hint {
                node_type: Some("operator".into()),
                parent: Some(ParentSource::Child(1)),
                children: vec![0, 2],
            },
        ),
        // 10: Power -> Unary
        Production::new("Power", 1, Shaping::Default),
        // 11: Unary -> minus Unary
        Production::new(
            "Unary",
            2,
            Shaping::Hint {
                node_type: Some("unary".into()),
                parent: Some(ParentSource::Child(0)),
                children: vec![1],
            },
        ),
        // 12: Unary -> plus Unary
        Production::new(
            "Unary",
            2,
            Shaping::Hint {
                node_type: Some("unary".into()),
                parent: Some(ParentSource::Child(0)),
                children: vec![1],
            },
        ),
        // 13: Unary -> Atom
        Production::new("Unary", 1, Shaping::Default),
        // 14: Atom -> lparen Sum rparen
        Production::new("Atom", 3, Shaping::Passthrough { index: 1 }),
        // 15: Atom -> int_literal
        Production::new(
            "Atom",
            1,
            Shaping::Hint {
                node_type: Some("int_literal".into()),
                parent: Some(ParentSource::Child(0)),
                children: vec![],
            },
        ),
    ]
}
