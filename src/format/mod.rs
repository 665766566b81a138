use module::Song;
use module::sample::{SampleDecoder, PcmDecoder};
use stream::Stream;
use Error;

pub mod m669;

// Supported formats

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Format {
    Composer669,
    Extended669,
}

#[derive(Debug, Clone)]
pub struct ProbeInfo {
    pub format     : Format,
    pub description: &'static str,
    pub title      : String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Don't decode sample data.
    pub no_samples: bool,
}

// Trait for module loader

pub trait Loader {
    fn name(&self) -> &'static str;
    fn probe(&self, b: &[u8]) -> Result<ProbeInfo, Error>;
    fn load(&self, s: &mut Stream, opts: &LoadOptions, dec: &dyn SampleDecoder) -> Result<Song, Error>;
}


pub fn list() -> Vec<Box<dyn Loader>> {
    vec![
        Box::new(m669::M669Loader),
    ]
}

pub fn probe(b: &[u8]) -> Result<ProbeInfo, Error> {
    for f in list() {
        debug!("probing format: {}", f.name());
        match f.probe(b) {
            Ok(info) => return Ok(info),
            Err(e)   => trace!("{}: {}", f.name(), e),
        }
    }

    Err(Error::Format("unsupported module format".to_owned()))
}

pub fn load(b: &[u8], opts: &LoadOptions) -> Result<Song, Error> {
    load_with(b, opts, &PcmDecoder)
}

/// Load a module using `dec` to convert the sample data.
pub fn load_with(b: &[u8], opts: &LoadOptions, dec: &dyn SampleDecoder) -> Result<Song, Error> {
    for f in list() {
        debug!("probing format: {}", f.name());

        let info = match f.probe(b) {
            Ok(val) => val,
            Err(_)  => continue,
        };

        debug!("probe ok, load format {:?}", info.format);
        return f.load(&mut Stream::new(b), opts, dec)
    }

    Err(Error::Format("unsupported module format".to_owned()))
}
