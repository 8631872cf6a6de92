//! Random phrase builder for the bot's status line and welcome cards.

use rand::seq::IndexedRandom;

const SUBJECTS: &[&str] = &[
    "The sentimental automaton",
    "A philosophical crow",
    "The silent server",
    "The moon, as a witness,",
    "Unfathomable code",
    "You, yes you,",
];

const VERBS: &[&str] = &[
    "contemplated",
    "questioned",
    "savoured",
    "charmed",
    "watched closely",
    "sang to",
];

const OBJECTS: &[&str] = &[
    "the misty horizon",
    "an ancient secret",
    "a coffee gone cold",
    "unspoken words",
    "sleeping dreams",
    "the gentle chaos of fate",
];

const MANNERS: &[&str] = &[
    "with no regrets",
    "in slow motion",
    "as if it were art",
    "under a borrowed sky",
];

const ARRIVALS: &[&str] = &[
    "parachuted in",
    "was summoned by mistake",
    "woke up from a 10,000 year nap",
    "whispered forbidden words in the dark",
    "accepted a pact they do not remember signing",
    "opened a grimoire they should not have",
    "stared into the abyss and the abyss blinked back",
];

const ENDINGS: &[&str] = &[
    "before the seas boil again.",
    "Memento mori.",
    "Ad astra per aspera.",
    "Lux in tenebris.",
    "enjoy it while there is still time.",
    "there is no way back now.",
    "the gates are already open.",
];

fn pick(options: &'static [&'static str]) -> &'static str {
    options.choose(&mut rand::rng()).copied().unwrap_or_default()
}

/// Builds a phrase for the bot's "watching" activity.
pub fn status_phrase() -> String {
    format!(
        "{} {} {} {}.",
        pick(SUBJECTS),
        pick(VERBS),
        pick(OBJECTS),
        pick(MANNERS)
    )
}

/// Builds a welcome greeting for a member mention.
pub fn welcome_phrase(mention: &str) -> String {
    format!("{} {}... {}", mention, pick(ARRIVALS), pick(ENDINGS))
}
