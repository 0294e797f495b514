use crate::error::GameError;
use std::fs;
use std::path::Path;

pub const EMBEDDED_CATEGORIES: &str = include_str!("resources/categories.txt");

/// A named group of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Singular form shown once the category is picked, e.g. "City".
    pub label: String,
    pub words: Vec<String>,
}

/// Immutable mapping from category index to its candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStore {
    categories: Vec<Category>,
}

impl WordStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The categories compiled into the binary.
    pub fn embedded() -> Result<Self, GameError> {
        Self::from_str(EMBEDDED_CATEGORIES)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let data = fs::read_to_string(path)?;
        Self::from_str(&data)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(data: &str) -> Result<Self, GameError> {
        let mut categories: Vec<Category> = Vec::new();
        let mut header_line = 0;

        for (index, raw) in data.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                close_category(&categories, header_line)?;
                let category = parse_header(header, line_no)?;
                if categories
                    .iter()
                    .any(|c| c.name.eq_ignore_ascii_case(&category.name))
                {
                    return Err(word_list_error(
                        line_no,
                        format!("duplicate category '{}'", category.name),
                    ));
                }
                categories.push(category);
                header_line = line_no;
                continue;
            }

            let Some(current) = categories.last_mut() else {
                return Err(word_list_error(line_no, "word outside of a category"));
            };
            if !line.chars().any(|c| c.is_ascii_alphabetic()) {
                return Err(word_list_error(
                    line_no,
                    format!("'{line}' has no letters to guess"),
                ));
            }
            current.words.push(line.to_string());
        }

        close_category(&categories, header_line)?;
        if categories.is_empty() {
            return Err(word_list_error(0, "no categories defined"));
        }
        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Result<&Category, GameError> {
        self.categories
            .get(index)
            .ok_or(GameError::InvalidCategory(index))
    }

    pub fn words_for(&self, index: usize) -> Result<&[String], GameError> {
        self.category(index).map(|c| c.words.as_slice())
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolve a category by case-insensitive name or 1-based number.
    pub fn find(&self, query: &str) -> Result<usize, GameError> {
        let query = query.trim();
        if let Ok(number) = query.parse::<usize>() {
            return match number.checked_sub(1) {
                Some(index) if index < self.categories.len() => Ok(index),
                _ => Err(GameError::UnknownCategory(query.to_string())),
            };
        }
        self.categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(query))
            .ok_or_else(|| GameError::UnknownCategory(query.to_string()))
    }
}

fn parse_header(header: &str, line_no: usize) -> Result<Category, GameError> {
    let (name, label) = match header.split_once('|') {
        Some((name, label)) => (name.trim(), label.trim()),
        None => (header.trim(), header.trim()),
    };
    if name.is_empty() {
        return Err(word_list_error(line_no, "category name is empty"));
    }
    let label = if label.is_empty() { name } else { label };
    Ok(Category {
        name: name.to_string(),
        label: label.to_string(),
        words: Vec::new(),
    })
}

fn close_category(categories: &[Category], header_line: usize) -> Result<(), GameError> {
    match categories.last() {
        Some(c) if c.words.is_empty() => Err(word_list_error(
            header_line,
            format!("category '{}' has no words", c.name),
        )),
        _ => Ok(()),
    }
}

fn word_list_error(line: usize, message: impl Into<String>) -> GameError {
    GameError::WordList {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_categories() {
        let store = WordStore::embedded().unwrap();
        assert_eq!(store.names(), vec!["Movie Titles", "Cities", "Sports"]);
        for category in store.categories() {
            assert_eq!(category.words.len(), 10);
        }
        assert_eq!(store.category(1).unwrap().label, "City 🏙️");
        assert!(store.words_for(1).unwrap().contains(&"Paris".to_string()));
        assert!(store.words_for(2).unwrap().contains(&"Ice Hockey".to_string()));
    }

    #[test]
    fn test_words_for_keeps_order() {
        let store = WordStore::from_str("[Fruit]\nApple\nPear\nFig\n").unwrap();
        assert_eq!(store.words_for(0).unwrap(), ["Apple", "Pear", "Fig"]);
    }

    #[test]
    fn test_words_for_invalid_category() {
        let store = WordStore::embedded().unwrap();
        assert!(matches!(
            store.words_for(3),
            Err(GameError::InvalidCategory(3))
        ));
        assert!(matches!(
            store.words_for(usize::MAX),
            Err(GameError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_label_defaults_to_name() {
        let store = WordStore::from_str("[Fruit]\nApple\n[ Trees | Tree ]\nOak\n").unwrap();
        assert_eq!(store.category(0).unwrap().label, "Fruit");
        assert_eq!(store.category(1).unwrap().name, "Trees");
        assert_eq!(store.category(1).unwrap().label, "Tree");
    }

    #[test]
    fn test_comments_and_whitespace_ignored() {
        let data = "# words\n\n  [Fruit]  \n   Apple  \n# more\n\nPear\n";
        let store = WordStore::from_str(data).unwrap();
        assert_eq!(store.words_for(0).unwrap(), ["Apple", "Pear"]);
    }

    #[test]
    fn test_word_before_header_rejected() {
        match WordStore::from_str("Apple\n[Fruit]\nPear\n") {
            Err(GameError::WordList { line, .. }) => assert_eq!(line, 1),
            other => panic!("Expected WordList error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_category_rejected() {
        match WordStore::from_str("[Fruit]\n[Trees]\nOak\n") {
            Err(GameError::WordList { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("Fruit"));
            }
            other => panic!("Expected WordList error, got {other:?}"),
        }
        assert!(WordStore::from_str("[Fruit]\nApple\n[Trees]\n").is_err());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        assert!(WordStore::from_str("[Fruit]\nApple\n[fruit]\nPear\n").is_err());
    }

    #[test]
    fn test_word_without_letters_rejected() {
        match WordStore::from_str("[Numbers]\n42\n") {
            Err(GameError::WordList { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected WordList error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(WordStore::from_str("").is_err());
        assert!(WordStore::from_str("# nothing here\n").is_err());
    }

    #[test]
    fn test_find_by_name_or_number() {
        let store = WordStore::embedded().unwrap();
        assert_eq!(store.find("cities").unwrap(), 1);
        assert_eq!(store.find("  SPORTS ").unwrap(), 2);
        assert_eq!(store.find("1").unwrap(), 0);
        assert_eq!(store.find("3").unwrap(), 2);
        assert!(matches!(store.find("0"), Err(GameError::UnknownCategory(_))));
        assert!(matches!(store.find("4"), Err(GameError::UnknownCategory(_))));
        assert!(matches!(
            store.find("Planets"),
            Err(GameError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let path = std::env::temp_dir().join(format!("shrugman_wordbank_test_{}.txt", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "[Colors | Color]").unwrap();
            writeln!(file, "Red").unwrap();
            writeln!(file, "Sky Blue").unwrap();
        }
        let store = WordStore::from_file(&path).unwrap();
        assert_eq!(store.words_for(0).unwrap(), ["Red", "Sky Blue"]);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            WordStore::from_file(&path),
            Err(GameError::Io(_))
        ));
    }
}
