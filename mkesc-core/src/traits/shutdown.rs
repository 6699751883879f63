//! Shutdown button sampling traits

/// Analog reading of the shutdown button sense line
pub trait VoltageSampler {
    /// Read the latest sense voltage (V)
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn sample_volts(&mut self) -> f32;
}

/// Motor speed query used to gate shutdown while the vehicle is moving
pub trait SpeedSource {
    /// Current signed motor speed in electrical RPM
    fn erpm(&self) -> f32;
}

/// A fixed speed, handy when the motor state is known
impl SpeedSource for f32 {
    fn erpm(&self) -> f32 {
        *self
    }
}

impl<S: SpeedSource + ?Sized> SpeedSource for &S {
    fn erpm(&self) -> f32 {
        (**self).erpm()
    }
}
