use std::collections::HashSet;

/// スタイルシートが定義するクラス名の集合（先頭の`.`は含まない）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorSet {
    classes: HashSet<String>,
}

impl SelectorSet {
    pub fn insert(&mut self, class_name: impl Into<String>) -> bool {
        self.classes.insert(class_name.into())
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
