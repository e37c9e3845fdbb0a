//! Error types for the txdag graph engine.
//!
//! Construction never fails for validated input; these errors surface only
//! when callers assemble graphs from foreign adjacency data.

use std::fmt;

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors produced when assembling a [`crate::Graph`] from raw adjacency lists.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A graph must contain at least the genesis vertex.
    #[error("graph must contain at least the genesis vertex")]
    Empty,
    /// An edge referenced a vertex outside the graph.
    #[error("vertex {vertex} references parent {parent}, but the graph has {vertex_count} vertices")]
    UnknownParent {
        /// Vertex that owns the offending edge.
        vertex: VertexId,
        /// Referenced parent identifier.
        parent: VertexId,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A graph must contain at least the genesis vertex.
        Empty => Empty => "GRAPH_EMPTY",
        /// An edge referenced a vertex outside the graph.
        UnknownParent => UnknownParent { .. } => "GRAPH_UNKNOWN_PARENT",
    }
}
