use crate::spec::ParameterGroup;

/// A parameter group wired to the function that derives scene state from it.
///
/// The target is passed on every call rather than captured, so the binding can
/// live next to the state it writes.
pub struct Binding<G, T: ?Sized> {
    group: G,
    recompute: Box<dyn Fn(&G, &mut T)>,
    recomputes: u64,
}

impl<G: ParameterGroup, T: ?Sized> Binding<G, T> {
    /// Bind `group` and run `recompute` once to establish the derived state.
    pub fn bind<F>(group: G, target: &mut T, recompute: F) -> Self
    where
        F: Fn(&G, &mut T) + 'static,
    {
        let mut binding = Self {
            group,
            recompute: Box::new(recompute),
            recomputes: 0,
        };
        tracing::debug!(
            group = G::NAME,
            fields = G::FIELDS.len(),
            "parameter group bound"
        );
        binding.refresh(target);
        binding
    }

    pub fn group(&self) -> &G {
        &self.group
    }

    pub fn value(&self, field: G::Field) -> f32 {
        self.group.value(field)
    }

    /// Write one control. Recomputes once if the stored value changed.
    pub fn set(&mut self, field: G::Field, value: f32, target: &mut T) -> bool {
        if !self.group.spec_mut(field).set(value) {
            return false;
        }
        tracing::debug!(
            group = G::NAME,
            field = G::label(field),
            value = self.group.value(field),
            "parameter changed"
        );
        self.refresh(target);
        true
    }

    /// Re-run recompute with the current values.
    pub fn refresh(&mut self, target: &mut T) {
        (self.recompute)(&self.group, target);
        self.recomputes += 1;
    }

    /// How many times recompute has run, including the initial one.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

impl<G: std::fmt::Debug, T: ?Sized> std::fmt::Debug for Binding<G, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("group", &self.group)
            .field("recomputes", &self.recomputes)
            .finish_non_exhaustive()
    }
}
