//! BSDF Event

use bitflags::bitflags;

bitflags! {
    /// Classifies the scattering event chosen by `BSDF::sample`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BSDFEvent: u8 {
        const DIFFUSE = 0b00000001;
        const GLOSSY = 0b00000010;
        const SPECULAR = 0b00000100;
        const REFLECTION = 0b00001000;
        const TRANSMISSION = 0b00010000;

        const DIFFUSE_REFLECTION = Self::DIFFUSE.bits() | Self::REFLECTION.bits();
        const DIFFUSE_TRANSMISSION = Self::DIFFUSE.bits() | Self::TRANSMISSION.bits();
        const GLOSSY_REFLECTION = Self::GLOSSY.bits() | Self::REFLECTION.bits();
        const GLOSSY_TRANSMISSION = Self::GLOSSY.bits() | Self::TRANSMISSION.bits();
        const SPECULAR_REFLECTION = Self::SPECULAR.bits() | Self::REFLECTION.bits();
        const SPECULAR_TRANSMISSION = Self::SPECULAR.bits() | Self::TRANSMISSION.bits();
    }
}

impl BSDFEvent {
    /// The event reported when sampling failed.
    pub const NULL: Self = Self::empty();

    /// Returns true for perfectly specular events, which next-event
    /// estimation cannot reproduce.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::SPECULAR)
    }
}
