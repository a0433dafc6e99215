pub mod bunny;
