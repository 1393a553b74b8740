// src/scanner/mod.rs
//
// Sessão de leitura de QR Code. A UI chama `poll` uma vez por quadro
// renderizado. A câmera é liberada em todo caminho de saída: código
// encontrado, cancelamento, falha de permissão ou `Drop`.

pub mod decode;
#[cfg(target_arch = "wasm32")]
pub mod web_camera;

use crate::error::ScanError;
use decode::{InversionAttempts, QrDecoder};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl Frame {
    pub fn filled(width: usize, height: usize, px: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rgba: px.repeat(width * height),
        }
    }

    pub fn from_image(image: &image::DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        Self {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            rgba: rgba.into_raw(),
        }
    }
}

/// Fonte de quadros (câmera ou imagem parada).
pub trait FrameSource {
    /// Pede acesso à câmera. No navegador a resposta chega depois; uma recusa
    /// tardia aparece como erro em `next_frame`.
    fn open(&mut self) -> Result<(), ScanError>;

    /// `Ok(None)` quando ainda não há quadro pronto.
    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError>;

    /// Para todas as trilhas de captura. Pode ser chamado mais de uma vez.
    fn release(&mut self);

    /// Fontes finitas (imagem parada) avisam quando não têm mais quadros.
    fn exhausted(&self) -> bool {
        false
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ScanPoll {
    Pending,
    Found(String),
    Exhausted,
    Failed(ScanError),
}

pub struct ScanSession {
    source: Box<dyn FrameSource>,
    decoder: Box<dyn QrDecoder>,
    policy: InversionAttempts,
    last_frame: Option<Frame>,
    released: bool,
}

impl ScanSession {
    pub fn start(
        mut source: Box<dyn FrameSource>,
        decoder: Box<dyn QrDecoder>,
    ) -> Result<Self, ScanError> {
        if let Err(err) = source.open() {
            log::warn!("camera acquire failed: {err}");
            source.release();
            return Err(err);
        }
        log::info!("scanner started");
        Ok(Self {
            source,
            decoder,
            policy: InversionAttempts::DontInvert,
            last_frame: None,
            released: false,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.released
    }

    /// Último quadro lido, para a pré-visualização.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Uma tentativa por quadro. Quadro sem código não é erro: tenta no próximo.
    pub fn poll(&mut self) -> ScanPoll {
        if self.released {
            return ScanPoll::Pending;
        }
        match self.source.next_frame() {
            Ok(Some(frame)) => {
                let found = self.decoder.decode(&frame, self.policy);
                self.last_frame = Some(frame);
                if let Some(payload) = found {
                    log::info!("QR code read");
                    self.release();
                    return ScanPoll::Found(payload);
                }
                if self.source.exhausted() {
                    self.release();
                    return ScanPoll::Exhausted;
                }
                ScanPoll::Pending
            }
            Ok(None) => ScanPoll::Pending,
            Err(err) => {
                log::warn!("scanner failed: {err}");
                self.release();
                ScanPoll::Failed(err)
            }
        }
    }

    pub fn cancel(mut self) {
        log::info!("scanner cancelled");
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.source.release();
            self.released = true;
            log::debug!("camera released");
        }
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Uma foto com QR Code usada como fonte de um único quadro (desktop).
pub struct StillImageSource {
    frame: Option<Frame>,
    delivered: bool,
}

impl StillImageSource {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Some(frame),
            delivered: false,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScanError> {
        let image = image::load_from_memory(bytes).map_err(|e| ScanError::Frame(e.to_string()))?;
        Ok(Self::new(Frame::from_image(&image)))
    }
}

impl FrameSource for StillImageSource {
    fn open(&mut self) -> Result<(), ScanError> {
        if self.frame.is_some() {
            Ok(())
        } else {
            Err(ScanError::CameraUnavailable("no image".into()))
        }
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        if self.delivered {
            return Ok(None);
        }
        self.delivered = true;
        Ok(self.frame.clone())
    }

    fn release(&mut self) {
        self.frame = None;
    }

    fn exhausted(&self) -> bool {
        self.delivered
    }
}

/// Fonte padrão da plataforma: câmera traseira no navegador.
#[cfg(target_arch = "wasm32")]
pub fn platform_camera() -> Option<Box<dyn FrameSource>> {
    Some(Box::new(web_camera::WebCamera::new()))
}

/// No desktop não há câmera; a leitura é feita a partir de uma foto.
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_camera() -> Option<Box<dyn FrameSource>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        opened: usize,
        released: usize,
    }

    /// Câmera falsa que entrega um roteiro de quadros.
    struct FakeCamera {
        log: Rc<RefCell<Log>>,
        deny: bool,
        script: VecDeque<Result<Option<Frame>, ScanError>>,
    }

    impl FakeCamera {
        fn new(log: &Rc<RefCell<Log>>, script: Vec<Result<Option<Frame>, ScanError>>) -> Self {
            Self {
                log: Rc::clone(log),
                deny: false,
                script: script.into(),
            }
        }
    }

    impl FrameSource for FakeCamera {
        fn open(&mut self) -> Result<(), ScanError> {
            self.log.borrow_mut().opened += 1;
            if self.deny {
                Err(ScanError::CameraUnavailable("permission denied".into()))
            } else {
                Ok(())
            }
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
            self.script.pop_front().unwrap_or(Ok(None))
        }

        fn release(&mut self) {
            self.log.borrow_mut().released += 1;
        }
    }

    /// Decodifica quadros cujo primeiro byte é 1 como "cachoeira-1".
    struct MarkerDecoder;

    impl QrDecoder for MarkerDecoder {
        fn decode(&self, frame: &Frame, policy: InversionAttempts) -> Option<String> {
            assert_eq!(policy, InversionAttempts::DontInvert);
            (frame.rgba.first() == Some(&1)).then(|| "cachoeira-1".to_owned())
        }
    }

    fn blank() -> Frame {
        Frame::filled(2, 2, [0, 0, 0, 255])
    }

    fn marked() -> Frame {
        Frame::filled(2, 2, [1, 0, 0, 255])
    }

    fn session(camera: FakeCamera) -> ScanSession {
        ScanSession::start(Box::new(camera), Box::new(MarkerDecoder)).unwrap()
    }

    #[test]
    fn keeps_polling_until_code_is_found_then_releases() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut s = session(FakeCamera::new(
            &log,
            vec![Ok(None), Ok(Some(blank())), Ok(Some(marked()))],
        ));

        assert_eq!(s.poll(), ScanPoll::Pending);
        assert_eq!(s.poll(), ScanPoll::Pending);
        assert_eq!(log.borrow().released, 0);
        assert_eq!(s.poll(), ScanPoll::Found("cachoeira-1".into()));
        assert!(!s.is_active());
        assert_eq!(log.borrow().released, 1);

        drop(s);
        assert_eq!(log.borrow().released, 1, "release happens once");
    }

    #[test]
    fn cancel_releases_camera() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut s = session(FakeCamera::new(&log, vec![Ok(Some(blank()))]));
        assert_eq!(s.poll(), ScanPoll::Pending);
        s.cancel();
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn dropping_session_releases_camera() {
        let log = Rc::new(RefCell::new(Log::default()));
        {
            let _s = session(FakeCamera::new(&log, vec![]));
        }
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn permission_denied_on_open_still_releases() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut camera = FakeCamera::new(&log, vec![]);
        camera.deny = true;
        let err = ScanSession::start(Box::new(camera), Box::new(MarkerDecoder))
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::CameraUnavailable(_)));
        assert_eq!(
            err.user_message(),
            "Não foi possível acessar a câmera. Por favor, verifique as permissões."
        );
        assert_eq!(log.borrow().opened, 1);
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn late_permission_failure_ends_session() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut s = session(FakeCamera::new(
            &log,
            vec![Ok(None), Err(ScanError::CameraUnavailable("NotAllowedError".into()))],
        ));
        assert_eq!(s.poll(), ScanPoll::Pending);
        assert!(matches!(s.poll(), ScanPoll::Failed(ScanError::CameraUnavailable(_))));
        assert_eq!(log.borrow().released, 1);
        assert_eq!(s.poll(), ScanPoll::Pending);
        drop(s);
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn still_image_without_code_is_exhausted() {
        let mut s = ScanSession::start(
            Box::new(StillImageSource::new(blank())),
            Box::new(MarkerDecoder),
        )
        .unwrap();
        assert_eq!(s.poll(), ScanPoll::Exhausted);
        assert!(!s.is_active());
        assert!(s.last_frame().is_some());
    }

    #[test]
    fn still_image_with_code_is_found() {
        let mut s = ScanSession::start(
            Box::new(StillImageSource::new(marked())),
            Box::new(MarkerDecoder),
        )
        .unwrap();
        assert_eq!(s.poll(), ScanPoll::Found("cachoeira-1".into()));
    }
}
