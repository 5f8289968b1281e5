//! 答题槽位
//!
//! 当前题目每个空格对应一个槽位，槽位为空或填着一个选中的词。

/// 当前题目的作答进度，一个空格一个槽位
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    slots: Vec<Option<String>>,
}

impl AnswerSet {
    /// 创建 `len` 个空槽位
    pub fn empty(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// 由词列表构造，空字符串视为空槽位
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = words
            .into_iter()
            .map(Into::into)
            .map(|w: String| if w.is_empty() { None } else { Some(w) })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 把 `word` 填进第一个空槽位，返回填入的位置
    ///
    /// 没有空槽位（或 `word` 为空）时什么也不做，返回 `None`。
    pub fn select_word(&mut self, word: &str) -> Option<usize> {
        if word.is_empty() {
            return None;
        }
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(word.to_string());
        Some(index)
    }

    /// 清空第 `index` 个槽位，越界时返回 `false`
    pub fn clear_slot(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// 所有槽位都已填写
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// 已填写的词，按槽位顺序
    pub fn used_words(&self) -> Vec<&str> {
        self.slots.iter().filter_map(|s| s.as_deref()).collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.slots.iter().any(|s| s.as_deref() == Some(word))
    }

    /// 转成词列表，空槽位为空字符串
    pub fn to_words(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|s| s.clone().unwrap_or_default())
            .collect()
    }

    /// 与期望答案逐项完全相等（同样的词、同样的顺序、同样的数量）
    pub fn matches(&self, expected: &[String]) -> bool {
        self.slots.len() == expected.len()
            && self
                .slots
                .iter()
                .zip(expected)
                .all(|(slot, want)| slot.as_deref().unwrap_or("") == want)
    }
}
