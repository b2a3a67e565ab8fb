pub mod configuration;

pub mod concurrent {
    pub mod multiplyingtask;
    pub mod parallelintegrator;
    pub mod readwriteexchange;
}

pub mod function {
    pub mod point;
    pub mod mathfunction;
    pub mod tabulatedfunctionerror;
    pub mod tabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod linkedlisttabulatedfunction;

    pub mod decorator {
        pub mod stricttabulatedfunction;
        pub mod unmodifiabletabulatedfunction;
        pub mod synchronizedtabulatedfunction;
    }

    pub mod factory {
        pub mod tabulatedfunctionfactory;
        pub mod arraytabulatedfunctionfactory;
        pub mod linkedlisttabulatedfunctionfactory;
    }
}

pub mod io {
    pub mod pointsequence;
}

pub mod operator {
    pub mod steppingdifferentialoperator;
    pub mod tabulateddifferentialoperator;
    pub mod tabulatedfunctionoperationservice;
    pub mod newtonrootfinder;
}
