pub const WORD_BUILDER: &str = "Word Builder";
pub const SPEECH_EXPLORER: &str = "Speech Explorer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCategory {
    Handwriting,
    Patterns,
    Math,
    Colors,
    Letters,
    Memory,
    Puzzles,
    Sounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMetadata {
    pub id: u32,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: GameCategory,
    pub difficulty: &'static str,
    pub duration_minutes: u32,
    pub instructions: &'static str,
}

pub static GAMES: [GameMetadata; 12] = [
    GameMetadata {
        id: 1,
        slug: "letter-trace",
        name: "Letter Trace",
        description: "Learn to write letters beautifully with guided exercises",
        category: GameCategory::Handwriting,
        difficulty: "Easy",
        duration_minutes: 10,
        instructions: "Follow the dotted lines to trace letters. Be as smooth as possible!",
    },
    GameMetadata {
        id: 2,
        slug: "shape-match",
        name: "Shape Match",
        description: "Match shapes and patterns to complete puzzles",
        category: GameCategory::Patterns,
        difficulty: "Medium",
        duration_minutes: 15,
        instructions: "Drag and drop shapes to match the pattern shown at the top.",
    },
    GameMetadata {
        id: 3,
        slug: "number-quest",
        name: "Number Quest",
        description: "Count and solve exciting math puzzles",
        category: GameCategory::Math,
        difficulty: "Medium",
        duration_minutes: 12,
        instructions: "Count the objects and click the correct number.",
    },
    GameMetadata {
        id: 4,
        slug: "color-explorer",
        name: "Color Explorer",
        description: "Learn colors by sorting and matching items",
        category: GameCategory::Colors,
        difficulty: "Easy",
        duration_minutes: 10,
        instructions: "Sort items by color and learn color names.",
    },
    GameMetadata {
        id: 5,
        slug: "alphabet-adventure",
        name: "Alphabet Adventure",
        description: "Journey through letters and word building",
        category: GameCategory::Letters,
        difficulty: "Medium",
        duration_minutes: 15,
        instructions: "Find the correct letters to spell words.",
    },
    GameMetadata {
        id: 6,
        slug: "memory-master",
        name: "Memory Master",
        description: "Test your memory with fun card matching games",
        category: GameCategory::Memory,
        difficulty: "Medium",
        duration_minutes: 12,
        instructions: "Flip cards to find matching pairs.",
    },
    GameMetadata {
        id: 7,
        slug: "puzzle-pal",
        name: "Puzzle Pal",
        description: "Solve logic puzzles and brain teasers",
        category: GameCategory::Puzzles,
        difficulty: "Hard",
        duration_minutes: 20,
        instructions: "Use logic to solve the puzzles step by step.",
    },
    GameMetadata {
        id: 8,
        slug: "sound-safari",
        name: "Sound Safari",
        description: "Discover animals and learn their sounds",
        category: GameCategory::Sounds,
        difficulty: "Easy",
        duration_minutes: 10,
        instructions: "Click animals to hear their sounds and learn about them.",
    },
    GameMetadata {
        id: 9,
        slug: "match-the-word",
        name: "Match the Word",
        description: "Match words with their corresponding pictures and emojis",
        category: GameCategory::Letters,
        difficulty: "Easy",
        duration_minutes: 10,
        instructions: "Look at the image and find the matching word from the options!",
    },
    GameMetadata {
        id: 10,
        slug: "tetris-word",
        name: "Tetris Word",
        description: "Form words from falling letter blocks to clear the grid",
        category: GameCategory::Letters,
        difficulty: "Hard",
        duration_minutes: 20,
        instructions: "Type or draw words using the letters in the grid. Longer words score more points!",
    },
    GameMetadata {
        id: 11,
        slug: "word-builder",
        name: WORD_BUILDER,
        description: "Construct the word using the provided letter pool. Watch out for extra letters!",
        category: GameCategory::Letters,
        difficulty: "Medium",
        duration_minutes: 12,
        instructions: "Click the letters in the correct order to build the word. Some letters are just for distraction!",
    },
    GameMetadata {
        id: 12,
        slug: "speech-explorer",
        name: SPEECH_EXPLORER,
        description: "Say the word shown on the card out loud",
        category: GameCategory::Sounds,
        difficulty: "Easy",
        duration_minutes: 10,
        instructions: "Press the microphone, say the word, and press it again to stop.",
    },
];

/// Static lookup from route parameters to games.
#[derive(Debug, Clone, Copy)]
pub struct GameCatalog {
    games: &'static [GameMetadata],
}

impl GameCatalog {
    pub const fn standard() -> Self {
        Self { games: &GAMES }
    }

    pub const fn new(games: &'static [GameMetadata]) -> Self {
        Self { games }
    }

    /// Resolve a route parameter: a numeric id (`"11"`) or a slug, with or
    /// without hyphens (`"word-builder"`, `"wordbuilder"`).
    pub fn resolve(&self, route_id: &str) -> Option<&'static GameMetadata> {
        let route_id = route_id.trim();
        if route_id.is_empty() {
            return None;
        }

        if let Ok(id) = route_id.parse::<u32>() {
            return self.games.iter().find(|game| game.id == id);
        }

        let wanted = compact_slug(route_id);
        self.games
            .iter()
            .find(|game| compact_slug(game.slug) == wanted)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static GameMetadata> {
        self.games
            .iter()
            .find(|game| game.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn all(&self) -> impl Iterator<Item = &'static GameMetadata> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn compact_slug(slug: &str) -> String {
    slug.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_by_numeric_id() {
        let catalog = GameCatalog::standard();
        assert_eq!(catalog.resolve("11").unwrap().name, WORD_BUILDER);
        assert_eq!(catalog.resolve(" 1 ").unwrap().name, "Letter Trace");
        assert!(catalog.resolve("99").is_none());
    }

    #[test]
    fn test_resolve_by_slug_variants() {
        let catalog = GameCatalog::standard();
        assert_eq!(catalog.resolve("word-builder").unwrap().id, 11);
        assert_eq!(catalog.resolve("wordbuilder").unwrap().id, 11);
        assert_eq!(catalog.resolve("Speech-Explorer").unwrap().name, SPEECH_EXPLORER);
        assert!(catalog.resolve("").is_none());
        assert!(catalog.resolve("chess").is_none());
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        let catalog = GameCatalog::standard();
        assert_eq!(catalog.by_name("tetris word").unwrap().id, 10);
        assert!(catalog.by_name("Tetris").is_none());
    }

    #[test]
    fn test_catalog_ids_and_slugs_are_unique() {
        let catalog = GameCatalog::standard();
        let ids: HashSet<u32> = catalog.all().map(|game| game.id).collect();
        let slugs: HashSet<String> = catalog.all().map(|game| compact_slug(game.slug)).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(slugs.len(), catalog.len());
    }
}
