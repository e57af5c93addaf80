use indexmap::IndexMap;

/// One spreadsheet row after filling and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    /// Blank for roots.
    pub parent: String,
    /// Display label.
    pub value: String,
    /// Sizing weight.
    pub value_num: f64,
    pub level: i64,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        parent: impl Into<String>,
        value: impl Into<String>,
        value_num: f64,
        level: i64,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            value: value.into(),
            value_num,
            level,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Records keyed by ID, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordIndex {
    records: IndexMap<String, Record>,
}

impl RecordIndex {
    pub(crate) fn insert(&mut self, record: Record) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn max_level(&self) -> Option<i64> {
        self.records.values().map(|r| r.level).max()
    }

    /// IDs of every record at `level`, in table order.
    pub fn ids_at_level(&self, level: i64) -> impl Iterator<Item = &str> {
        self.records
            .values()
            .filter(move |r| r.level == level)
            .map(|r| r.id.as_str())
    }
}
