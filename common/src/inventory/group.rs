use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
    pub name: String,
    pub description: String,
    /// Member FQDNs in discovery order. Duplicates are allowed here.
    pub members: Vec<String>,
    /// Classes that pull a host into this group. Empty for project groups.
    pub classes: Vec<String>,
}

impl GroupDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            members: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn project(name: &str) -> Self {
        Self::new(name, format!("{name} project"))
    }

    pub fn is_class_driven(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn matches_any(&self, host_classes: &[String]) -> bool {
        host_classes.iter().any(|c| self.classes.contains(c))
    }

    /// Members with repeats removed, first occurrence kept.
    pub fn unique_members(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if !seen.contains(&member.as_str()) {
                seen.push(member);
            }
        }
        seen
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
