pub mod impl_reqwest_transport;
