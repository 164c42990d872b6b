pub mod rrf_fusion;
pub mod vector_index;
