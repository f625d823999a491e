pub mod mot;
