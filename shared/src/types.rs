pub type PayloadNetId = u16;
