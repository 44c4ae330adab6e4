use serde::{Deserialize, Serialize};

/// A single layer of the board stackup as seen by the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub name: String,
    /// Signal layers carry traces, plane layers do not
    pub is_signal: bool,
}

impl LayerDescriptor {
    pub fn new(name: impl Into<String>, is_signal: bool) -> Self {
        Self {
            name: name.into(),
            is_signal,
        }
    }

    pub fn signal(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn plane(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Ordered layer stackup of the board, top to bottom.
///
/// Layer identity is positional: index 0 is the top layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStructure {
    layers: Vec<LayerDescriptor>,
}

impl LayerStructure {
    pub fn new(layers: Vec<LayerDescriptor>) -> Self {
        Self { layers }
    }

    /// Plain two layer board, both sides routable
    pub fn default_two_layer() -> Self {
        Self::new(vec![
            LayerDescriptor::signal("F.Cu"),
            LayerDescriptor::signal("B.Cu"),
        ])
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get a layer by position. Panics if `index` is not a layer of this board.
    pub fn get(&self, index: usize) -> &LayerDescriptor {
        assert!(
            index < self.layers.len(),
            "layer index {} out of range for a {} layer board",
            index,
            self.layers.len()
        );
        &self.layers[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    pub fn signal_layer_count(&self) -> usize {
        self.layers.iter().filter(|layer| layer.is_signal).count()
    }
}

impl Default for LayerStructure {
    fn default() -> Self {
        Self::default_two_layer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_layer_count() {
        let structure = LayerStructure::new(vec![
            LayerDescriptor::signal("F.Cu"),
            LayerDescriptor::plane("In1.Cu"),
            LayerDescriptor::plane("In2.Cu"),
            LayerDescriptor::signal("B.Cu"),
        ]);
        assert_eq!(structure.len(), 4);
        assert_eq!(structure.signal_layer_count(), 2);
        assert_eq!(structure.get(1).name, "In1.Cu");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let structure = LayerStructure::default_two_layer();
        structure.get(2);
    }
}
