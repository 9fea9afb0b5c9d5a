mod office;

pub use office::PublicAffairsOffice;
