pub mod layers;
pub mod settings;

pub use layers::{LayerDescriptor, LayerStructure};
pub use settings::{
    AutorouteSettings, LayerAutorouteConfig, PassSnapshot, PreferredDirection, RoutePass,
};
