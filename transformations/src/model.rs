use std::fmt;
use std::str::FromStr;

use crate::error::TransformationError;

/// The set of cartoon styles a backend can be bound to.
///
/// Names match the weight file stems in the weights folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    CelebaDistill,
    FacePaint512V1,
    FacePaint512V2,
    Paprika,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::CelebaDistill,
        ModelVariant::FacePaint512V1,
        ModelVariant::FacePaint512V2,
        ModelVariant::Paprika,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::CelebaDistill => "celeba_distill",
            ModelVariant::FacePaint512V1 => "face_paint_512_v1",
            ModelVariant::FacePaint512V2 => "face_paint_512_v2",
            ModelVariant::Paprika => "paprika",
        }
    }
}

impl FromStr for ModelVariant {
    type Err = TransformationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == name)
            .ok_or_else(|| TransformationError::UnknownModel(name.to_string()))
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
