use crate::{EvenProducer, OddProducer, PrimeProducer, Producer};

/// Builds the producers a run launches.
///
/// The coordinator asks for one odd and one prime producer at launch, and for
/// a fresh even producer every time it (re)activates one. Swap the factory to
/// drive a run with custom random sources or instrumented producers.
pub trait ProducerFactory: Send + Sync {
    type Odd: Producer;
    type Prime: Producer;
    type Even: Producer;

    fn odd(&self) -> Self::Odd;
    fn prime(&self) -> Self::Prime;
    fn even(&self) -> Self::Even;
}

/// The standard producer set: thread-local random odd and even producers and
/// a prime producer starting at 2.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProducers;

impl ProducerFactory for DefaultProducers {
    type Odd = OddProducer;
    type Prime = PrimeProducer;
    type Even = EvenProducer;

    fn odd(&self) -> Self::Odd {
        OddProducer::new()
    }

    fn prime(&self) -> Self::Prime {
        PrimeProducer::new()
    }

    fn even(&self) -> Self::Even {
        EvenProducer::new()
    }
}
