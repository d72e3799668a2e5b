use crate::model::{Kind, KindRef};

impl Kind {
    /// Ancestor kinds of this kind, oldest first
    ///
    /// Follows declared parents upward, then reverses to get root-to-parent
    /// order. Excludes this kind and the root; empty when there is no
    /// declared parent.
    pub fn ancestors(&self) -> Vec<KindRef> {
        let mut path = Vec::new();
        let mut current = self.parent.clone();

        while let Some(kind) = current {
            current = kind.parent.clone();
            path.push(kind);
        }

        path.reverse();
        path
    }

    /// Names of `ancestors()`, oldest first
    pub fn ancestor_names(&self) -> Vec<String> {
        self.ancestors()
            .iter()
            .map(|kind| kind.name().to_string())
            .collect()
    }
}
