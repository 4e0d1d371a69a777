//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{CheckUseCase, GenerateUseCase};
use crate::config::Config;
use crate::infrastructure::{
    CommandChecker, CommandGenerator, ConfiguredDiscovery, LocalFs, MakeDepfileRepository,
    OutputMode,
};

/// Type alias for the concrete CheckUseCase with all dependencies
pub type ConcreteCheckUseCase =
    CheckUseCase<LocalFs, MakeDepfileRepository, CommandChecker, ConfiguredDiscovery>;

/// Type alias for the concrete GenerateUseCase with all dependencies
pub type ConcreteGenerateUseCase = GenerateUseCase<LocalFs, CommandGenerator>;

/// Create a check use case from configuration
pub fn create_check_use_case(config: &Config, mode: OutputMode) -> ConcreteCheckUseCase {
    let checker = CommandChecker::new(config.check.commands.clone()).with_output_mode(mode);
    let discovery = ConfiguredDiscovery::from_mode(config.check.discovery);

    CheckUseCase::new(
        LocalFs::new(),
        MakeDepfileRepository::new(),
        checker,
        discovery,
    )
}

/// Create a generate use case from configuration
pub fn create_generate_use_case(config: &Config, mode: OutputMode) -> ConcreteGenerateUseCase {
    let generator = CommandGenerator::new(config.generate.command()).with_output_mode(mode);

    GenerateUseCase::new(LocalFs::new(), generator)
}
