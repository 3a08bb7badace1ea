pub mod backend;
pub mod data;
pub mod mesh;
pub mod recording;
pub mod shader;
pub mod sprite;
