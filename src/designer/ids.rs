use uuid::Uuid;

/// Hands out element ids at add-time. Ids are never reused within a source.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs; the default for interactive sessions.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `prefix-1`, `prefix-2`, ... for replay scripts and tests that need to
/// address freshly dropped elements by id.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Build an id source from its config name (`uuid` or `sequential`).
pub fn id_source(strategy: &str, prefix: &str) -> Box<dyn IdSource> {
    match strategy {
        "sequential" => Box::new(SequentialIds::new(prefix)),
        _ => Box::new(UuidIds),
    }
}
