// src/error.rs
//
// Erros do app. Cada variante que chega na UI tem uma mensagem em português
// pronta para o alerta.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("browser storage error: {0}")]
    Browser(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("park `{park}` references unknown badge `{badge}`")]
    UnknownBadge { park: String, badge: String },

    #[error("park `{park}`, question {index}: {reason}")]
    InvalidQuestion {
        park: String,
        index: usize,
        reason: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum UnlockError {
    #[error("badge `{0}` not found in catalog")]
    NotFound(String),

    #[error("could not persist collected badges: {0}")]
    Persist(#[from] StoreError),
}

impl UnlockError {
    pub fn user_message(&self) -> &'static str {
        match self {
            UnlockError::NotFound(_) => "QR Code inválido ou não corresponde a um badge.",
            UnlockError::Persist(_) => "Não foi possível salvar o seu progresso. Tente novamente.",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("answer rejected while feedback is visible")]
    FeedbackPending,

    #[error("quiz already finished")]
    Finished,

    #[error("`{0}` is not one of the options")]
    UnknownOption(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("could not read frame: {0}")]
    Frame(String),
}

impl ScanError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ScanError::CameraUnavailable(_) => {
                "Não foi possível acessar a câmera. Por favor, verifique as permissões."
            }
            ScanError::Frame(_) => "Não foi possível ler a imagem para procurar o QR Code.",
        }
    }
}

#[derive(Error, Debug)]
pub enum StampError {
    #[error("could not decode photo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("photo has no pixels")]
    EmptyImage,

    #[error("stamped photo would be {width}x{height}")]
    TooLarge { width: u32, height: u64 },

    #[error("no usable font: {0}")]
    Font(String),
}

impl StampError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StampError::Decode(_) | StampError::EmptyImage => {
                "Não foi possível abrir essa foto. Escolha outra imagem."
            }
            StampError::TooLarge { .. } => {
                "Essa foto é estreita demais para o carimbo. Escolha outra imagem."
            }
            StampError::Font(_) => "Não foi possível desenhar o carimbo nesta plataforma.",
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser download failed: {0}")]
    Browser(String),
}

impl ExportError {
    pub fn user_message(&self) -> &'static str {
        "Não foi possível salvar a imagem."
    }
}

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("native share is not supported")]
    Unsupported,

    #[error("share failed: {0}")]
    Failed(String),
}

impl ShareError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ShareError::Unsupported => {
                "A API de compartilhamento não é suportada neste navegador. Tente baixar a imagem."
            }
            ShareError::Failed(_) => "Não foi possível compartilhar a imagem.",
        }
    }
}
