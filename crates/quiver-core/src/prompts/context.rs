/// Assembles the context block injected for a downstream agent: a base
/// preamble followed by one section per selected skill.
pub struct ContextBuilder {
    base: String,
    sections: Vec<String>,
    limit: usize,
}

impl ContextBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            sections: Vec::new(),
            limit: 0,
        }
    }

    /// Cap the number of skill sections. 0 means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_skill(mut self, name: &str, body: &str) -> Self {
        if self.limit > 0 && self.sections.len() >= self.limit {
            return self;
        }
        let body = body.trim();
        if body.is_empty() {
            return self;
        }
        self.sections.push(format!("## Skill: {}\n\n{}", name, body));
        self
    }

    pub fn build(self) -> String {
        if self.sections.is_empty() {
            return self.base;
        }
        format!("{}\n\n{}", self.base, self.sections.join("\n\n"))
    }
}
