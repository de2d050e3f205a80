// ABOUTME: Client drivers for the four Greeter interaction patterns
// ABOUTME: Connects a channel and drives unary, server-, client-, and bidi-streaming calls

pub mod driver;

pub use driver::GreetClient;

// Re-export the shared error type for callers embedding the drivers
pub use greet_grpc::GreetError;
