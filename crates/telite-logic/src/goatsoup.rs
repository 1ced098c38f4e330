//! Planet descriptions from a recursive phrase grammar.
//!
//! Placeholders are characters in `U+0081..=U+00B2`. Phrase placeholders pick
//! one of five expansions with a private 4-byte generator seeded from the
//! system, so a description is a pure function of the system and can be
//! regenerated at will without touching galaxy state.

use crate::names::{capitalize, make_name, PairTable};
use crate::planet::System;

/// Root of every description.
pub const TEMPLATE: &str = "\u{8F} is \u{97}.";

/// Replaced by the system's name.
const SYSTEM_NAME: char = '\u{B0}';
/// Replaced by the system's name with an "-ian" suffix.
const DEMONYM: char = '\u{B1}';
/// Replaced by a freshly generated name.
const RANDOM_NAME: char = '\u{B2}';

/// First phrase placeholder; `PHRASES[c - FIRST_PHRASE]`.
const FIRST_PHRASE: u32 = 0x81;

const PHRASES: [[&str; 5]; 36] = [
    // 0x81
    ["fabled", "notable", "well known", "famous", "noted"],
    // 0x82
    ["very", "mildly", "most", "reasonably", ""],
    // 0x83
    ["ancient", "\u{95}", "great", "vast", "pink"],
    // 0x84
    ["\u{9E} \u{9D} plantations", "mountains", "\u{9C}", "\u{94} forests", "oceans"],
    // 0x85
    ["shyness", "silliness", "mating traditions", "loathing of \u{86}", "love for \u{86}"],
    // 0x86
    ["food blenders", "tourists", "poetry", "discos", "\u{8E}"],
    // 0x87
    ["talking tree", "crab", "bat", "lobst", "\u{B2}"],
    // 0x88
    ["beset", "plagued", "ravaged", "cursed", "scourged"],
    // 0x89
    [
        "\u{96} civil war",
        "\u{9B} \u{98} \u{99}s",
        "a \u{9B} disease",
        "\u{96} earthquakes",
        "\u{96} solar activity",
    ],
    // 0x8A
    [
        "its \u{83} \u{84}",
        "the \u{B1} \u{98} \u{99}",
        "its inhabitants' \u{9A} \u{85}",
        "\u{A1}",
        "its \u{8D} \u{8E}",
    ],
    // 0x8B
    ["juice", "brandy", "water", "brew", "gargle blasters"],
    // 0x8C
    ["\u{B2}", "\u{B1} \u{99}", "\u{B1} \u{B2}", "\u{B1} \u{9B}", "\u{9B} \u{B2}"],
    // 0x8D
    ["fabulous", "exotic", "hoopy", "unusual", "exciting"],
    // 0x8E
    ["cuisine", "night life", "casinos", "sit coms", " \u{A1} "],
    // 0x8F
    ["\u{B0}", "The planet \u{B0}", "The world \u{B0}", "This planet", "This world"],
    // 0x90
    ["n unremarkable", " boring", " dull", " tedious", " revolting"],
    // 0x91
    ["planet", "world", "place", "little planet", "dump"],
    // 0x92
    ["wasp", "moth", "grub", "ant", "\u{B2}"],
    // 0x93
    ["poet", "arts graduate", "yak", "snail", "slug"],
    // 0x94
    ["tropical", "dense", "rain", "impenetrable", "exuberant"],
    // 0x95
    ["funny", "wierd", "unusual", "strange", "peculiar"],
    // 0x96
    ["frequent", "occasional", "unpredictable", "dreadful", "deadly"],
    // 0x97
    [
        "\u{82} \u{81} for \u{8A}",
        "\u{82} \u{81} for \u{8A} and \u{8A}",
        "\u{88} by \u{89}",
        "\u{82} \u{81} for \u{8A} but \u{88} by \u{89}",
        "a\u{90} \u{91}",
    ],
    // 0x98
    ["\u{9B}", "mountain", "edible", "tree", "spotted"],
    // 0x99
    ["\u{9F}", "\u{A0}", "\u{87}oid", "\u{93}", "\u{92}"],
    // 0x9A
    ["ancient", "exceptional", "eccentric", "ingrained", "\u{95}"],
    // 0x9B
    ["killer", "deadly", "evil", "lethal", "vicious"],
    // 0x9C
    ["parking meters", "dust clouds", "ice bergs", "rock formations", "volcanoes"],
    // 0x9D
    ["plant", "tulip", "banana", "corn", "\u{B2}weed"],
    // 0x9E
    ["\u{B2}", "\u{B1} \u{B2}", "\u{B1} \u{9B}", "inhabitant", "\u{B1} \u{B2}"],
    // 0x9F
    ["shrew", "beast", "bison", "snake", "wolf"],
    // 0xA0
    ["leopard", "cat", "monkey", "goat", "fish"],
    // 0xA1
    [
        "\u{8C} \u{8B}",
        "\u{B1} \u{9F} \u{A2}",
        "its \u{8D} \u{A0} \u{A2}",
        "\u{A3} \u{A4}",
        "\u{8C} \u{8B}",
    ],
    // 0xA2
    ["meat", "cutlet", "steak", "burgers", "soup"],
    // 0xA3
    ["ice", "mud", "Zero-G", "vacuum", "\u{B1} ultra"],
    // 0xA4
    ["hockey", "cricket", "karate", "polo", "tennis"],
];

/// The 4-byte generator behind goat-soup choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoatSoupRng {
    state: [u8; 4],
}

impl GoatSoupRng {
    pub fn new(seed: [u8; 4]) -> Self {
        Self { state: seed }
    }

    /// Double byte 0 into byte 2 with carry, then fold bytes 1 and 3.
    pub fn next_byte(&mut self) -> u8 {
        let [s0, s1, s2, s3] = self.state;
        let doubled = s0.wrapping_shl(1);
        let mut a = doubled as u16 + s2 as u16;
        if s0 > 127 {
            a += 1;
        }
        let carry = a >> 8;
        let b = (carry + s1 as u16 + s3 as u16) as u8;
        self.state = [a as u8, b, doubled, s1];
        b
    }
}

/// Expansion state for one description.
struct Expander<'a> {
    rng: GoatSoupRng,
    name: &'a str,
}

impl Expander<'_> {
    fn expand(&mut self, source: &str, out: &mut String) {
        for c in source.chars() {
            match c {
                SYSTEM_NAME => out.push_str(&capitalize(self.name)),
                DEMONYM => out.push_str(&demonym(self.name)),
                RANDOM_NAME => {
                    let len = self.rng.next_byte() & 3;
                    let samples: Vec<u8> = (0..len).map(|_| self.rng.next_byte()).collect();
                    out.push_str(&capitalize(&make_name(samples, PairTable::Extended)));
                }
                _ => match phrase_options(c) {
                    Some(options) => {
                        let choice = options[(self.rng.next_byte() % 5) as usize];
                        self.expand(choice, out);
                    }
                    None => out.push(c),
                },
            }
        }
    }
}

fn phrase_options(c: char) -> Option<&'static [&'static str; 5]> {
    (c as u32)
        .checked_sub(FIRST_PHRASE)
        .and_then(|i| PHRASES.get(i as usize))
}

/// "Lave" → "Lavian", "Diso" → "Disian".
pub fn demonym(name: &str) -> String {
    let stem = match name.chars().last() {
        Some(last) if "aeiou".contains(last.to_ascii_lowercase()) => {
            &name[..name.len() - last.len_utf8()]
        }
        _ => name,
    };
    format!("{}ian", capitalize(stem))
}

/// Expand an arbitrary template for `system`.
pub fn expand_template(system: &System, template: &str) -> String {
    let mut expander = Expander {
        rng: GoatSoupRng::new(system.goatsoup_seed()),
        name: &system.name,
    };
    let mut out = String::new();
    expander.expand(template, &mut out);

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => out,
    }
}

/// The system's description sentence.
pub fn goatsoup(system: &System) -> String {
    expand_template(system, TEMPLATE)
}
